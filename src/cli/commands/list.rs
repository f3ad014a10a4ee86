//! List command implementation.
//!
//! Replays the board's three inputs in the order the portal receives them:
//! committee toggle, status filter, search text.

use desk_lib::{Result, StatusFilter};

use crate::cli::ListArgs;
use crate::config::CliOverrides;

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the status filter is invalid or the portal is
/// hidden behind login.
pub fn execute(args: &ListArgs, json: bool, cli: &CliOverrides) -> Result<()> {
    let filter: StatusFilter = args.status.parse()?;

    let mut portal = super::open_portal(cli)?;
    let first = portal.set_committee_mode(args.committee);
    let mut view = portal.set_status_filter(filter);
    super::carry_notices(first, &mut view);
    let mut last = portal.set_search(args.search.as_deref().unwrap_or_default());
    super::carry_notices(view, &mut last);

    super::print_view(&last, json)
}
