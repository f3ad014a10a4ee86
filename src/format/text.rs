//! Text formatting functions for `resident_desk`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Status icons (○ ◐ ✓)
//! - Status badges ([Open], [In Progress], ...)
//! - Card and board layout

use desk_lib::{Board, IssueCard, Notice, Status};
use unicode_width::UnicodeWidthStr;

/// Status icon characters.
pub mod icons {
    /// Open - waiting on the committee (hollow circle).
    pub const OPEN: &str = "○";
    /// In progress - being worked on (half-filled).
    pub const IN_PROGRESS: &str = "◐";
    /// Resolved - done (checkmark).
    pub const RESOLVED: &str = "✓";
    /// Unknown status.
    pub const UNKNOWN: &str = "?";
}

/// Line shown when the filters hide every issue.
pub const EMPTY_BOARD: &str = "No issues match the current filters.";

const INDENT: &str = "   ";

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: &Status) -> &'static str {
    match status {
        Status::Open => icons::OPEN,
        Status::InProgress => icons::IN_PROGRESS,
        Status::Resolved => icons::RESOLVED,
        Status::Custom(_) => icons::UNKNOWN,
    }
}

/// Format status as a bracketed badge.
#[must_use]
pub fn format_status_badge(status: &Status) -> String {
    format!("[{}]", status.as_str())
}

/// Format a card as an indented block.
///
/// ```text
/// ○ [Open] Security: Gate broken
/// ─────────────────────────────────
///    Asha (B-2) • 17 Oct 2026, 9:05 am
///    The east gate does not latch.
///    Issue ID: OB-4821
///    Updates:
///      - No committee updates yet.
/// ```
#[must_use]
pub fn format_card(card: &IssueCard) -> String {
    let title = format!(
        "{} {} {}",
        format_status_icon(&card.status),
        format_status_badge(&card.status),
        card.header
    );
    let rule = "─".repeat(title.width());

    let mut out = String::new();
    out.push_str(&title);
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("{INDENT}{}\n", card.meta));
    if !card.description.is_empty() {
        for line in card.description.lines() {
            out.push_str(&format!("{INDENT}{line}\n"));
        }
    }
    out.push_str(&format!("{INDENT}{}\n", card.id_label));
    out.push_str(&format!("{INDENT}Updates:\n"));
    for update in &card.updates {
        out.push_str(&format!("{INDENT}  - {update}\n"));
    }

    if let Some(form) = &card.committee_form {
        let options: Vec<String> = form
            .status_options
            .iter()
            .map(|status| {
                if *status == form.selected_status {
                    format!("*{status}*")
                } else {
                    status.to_string()
                }
            })
            .collect();
        out.push_str(&format!(
            "{INDENT}Committee: {} → desk update {} --status <STATUS> --note <NOTE>\n",
            options.join(" | "),
            form.issue_id
        ));
    }
    out
}

/// Format notices as `! message` lines.
#[must_use]
pub fn format_notices(notices: &[Notice]) -> String {
    notices.iter().map(|n| format!("! {n}\n")).collect()
}

/// Format the whole board: welcome line, notices, cards and a footer count.
#[must_use]
pub fn format_board(board: &Board) -> String {
    let mut out = String::new();
    if let Some(welcome) = &board.welcome {
        out.push_str(welcome);
        out.push_str("\n\n");
    }
    out.push_str(&format_notices(&board.notices));

    if board.empty {
        out.push_str(EMPTY_BOARD);
        out.push('\n');
    } else {
        let cards: Vec<String> = board.cards.iter().map(format_card).collect();
        out.push_str(&cards.join("\n"));
    }

    out.push_str(&format!(
        "\n{} of {} issue(s){}\n",
        board.cards.len(),
        board.total,
        if board.committee_mode {
            " · committee mode"
        } else {
            ""
        }
    ));
    out
}
