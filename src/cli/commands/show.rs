//! Show command implementation.

use desk_lib::Result;
use desk_lib::util::normalize_id;

use crate::cli::ShowArgs;
use crate::config::CliOverrides;
use crate::format;

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the issue is not found or the portal is hidden
/// behind login.
pub fn execute(args: &ShowArgs, json: bool, cli: &CliOverrides) -> Result<()> {
    let mut portal = super::open_portal(cli)?;
    let view = portal.set_committee_mode(args.committee);
    let card = portal.card(&normalize_id(&args.id))?;

    if json {
        return format::print_json(&card);
    }
    if let Some(board) = view.board() {
        print!("{}", format::format_notices(&board.notices));
    }
    print!("{}", format::format_card(&card));
    Ok(())
}
