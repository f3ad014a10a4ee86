//! Output formatting for `resident_desk`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//! Boards and cards serialize straight from the library's view types; the
//! extra JSON shapes live in [`output`].

mod output;
mod text;

pub use output::{SessionStatus, SubmittedIssue, VersionOutput, print_json};
pub use text::{
    EMPTY_BOARD, format_board, format_card, format_notices, format_status_badge,
    format_status_icon,
};
