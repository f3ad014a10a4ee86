//! Submit command implementation.

use desk_lib::{NewIssue, PortalView, Result};

use crate::cli::SubmitArgs;
use crate::config::CliOverrides;
use crate::format::{self, SubmittedIssue};

/// Execute the submit command.
///
/// # Errors
///
/// Returns an error if nobody is logged in on a gated portal or the issue
/// cannot be saved.
pub fn execute(args: &SubmitArgs, json: bool, cli: &CliOverrides) -> Result<()> {
    let mut portal = super::open_portal(cli)?;
    let (issue, view) = portal.submit_issue(&to_new_issue(args))?;
    let notices = match view {
        PortalView::Board(board) => board.notices,
        PortalView::LoggedOut => Vec::new(),
    };

    if json {
        return format::print_json(&SubmittedIssue { issue, notices });
    }

    print!("{}", format::format_notices(&notices));
    println!("Created {}: {}", issue.id, issue.issue_title);
    Ok(())
}

/// Map CLI flags onto the submission form fields.
fn to_new_issue(args: &SubmitArgs) -> NewIssue {
    NewIssue {
        resident_name: args.resident_name.clone(),
        unit_number: args.unit_number.clone(),
        contact_number: args.contact_number.clone(),
        category: args.category.clone(),
        issue_title: args.title.clone(),
        issue_description: args.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_new_issue_maps_every_field() {
        let args = SubmitArgs {
            resident_name: "A".to_string(),
            unit_number: "B-2".to_string(),
            contact_number: "123".to_string(),
            category: "Security".to_string(),
            title: "Gate broken".to_string(),
            description: "desc".to_string(),
        };
        let input = to_new_issue(&args);
        assert_eq!(input.resident_name, "A");
        assert_eq!(input.unit_number, "B-2");
        assert_eq!(input.contact_number, "123");
        assert_eq!(input.category, "Security");
        assert_eq!(input.issue_title, "Gate broken");
        assert_eq!(input.issue_description, "desc");
    }
}
