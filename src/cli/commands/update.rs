//! Update command implementation (committee submission).

use desk_lib::util::normalize_id;
use desk_lib::{Result, Status};

use crate::cli::UpdateArgs;
use crate::config::CliOverrides;
use crate::format;

/// Execute the update command.
///
/// # Errors
///
/// Returns an error if the status is invalid, the issue doesn't exist, the
/// portal is hidden behind login, or the change cannot be saved.
pub fn execute(args: &UpdateArgs, json: bool, cli: &CliOverrides) -> Result<()> {
    let status: Status = args.status.parse()?;
    let id = normalize_id(&args.id);

    let mut portal = super::open_portal(cli)?;
    let opened = portal.set_committee_mode(true);
    let (issue, mut view) =
        portal.submit_committee_update(&id, status, args.note.as_deref().unwrap_or_default())?;
    super::carry_notices(opened, &mut view);

    let card = portal.card(&issue.id)?;
    if json {
        return format::print_json(&card);
    }
    if let Some(board) = view.board() {
        print!("{}", format::format_notices(&board.notices));
    }
    println!("Updated {} → {}", issue.id, issue.status);
    print!("{}", format::format_card(&card));
    Ok(())
}
