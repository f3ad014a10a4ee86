//! Command implementations.
//!
//! Each command loads config, opens the portal over file storage, feeds it
//! the matching events and prints the view it returns.

pub mod completions;
pub mod config;
pub mod list;
pub mod session;
pub mod show;
pub mod submit;
pub mod update;
pub mod version;

use desk_lib::{DeskError, FileStorage, Portal, PortalView, Result};

use crate::config::{self as desk_config, CliOverrides};
use crate::format;

/// Load config and open the portal it describes.
pub(crate) fn open_portal(cli: &CliOverrides) -> Result<Portal<FileStorage>> {
    let config = desk_config::load(cli)?;
    desk_config::open_portal(&config)
}

/// Print a rendered view; a logged-out portal is an error.
pub(crate) fn print_view(view: &PortalView, json: bool) -> Result<()> {
    let PortalView::Board(board) = view else {
        return Err(DeskError::NotLoggedIn);
    };
    if json {
        format::print_json(board)
    } else {
        print!("{}", format::format_board(board));
        Ok(())
    }
}

/// Move notices drained by an earlier render onto the view that gets printed.
pub(crate) fn carry_notices(earlier: PortalView, later: &mut PortalView) {
    if let (PortalView::Board(earlier), PortalView::Board(later)) = (earlier, later) {
        let mut notices = earlier.notices;
        notices.append(&mut later.notices);
        later.notices = notices;
    }
}
