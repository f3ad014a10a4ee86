//! Card rendering.
//!
//! `render_card` turns one issue into a plain view-description. Adapters
//! (the terminal printer, a JSON dump) decide how to draw it; nothing here
//! touches the store.

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use serde::Serialize;

use crate::model::{Issue, Status};

/// Placeholder line for an issue with an empty history.
pub const NO_UPDATES: &str = "No committee updates yet.";

/// Medium date plus short time, the way en-IN renders it: `17 Oct 2026, 3:05 pm`.
const DATE_PATTERN: &str = "%-d %b %Y, %-I:%M %P";

/// Formats timestamps in one fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    offset: FixedOffset,
}

impl DateFormat {
    #[must_use]
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// The machine's current local offset.
    #[must_use]
    pub fn local() -> Self {
        Self {
            offset: Local::now().offset().fix(),
        }
    }

    /// `None` if the offset is outside ±24h.
    #[must_use]
    pub fn with_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(|offset| Self { offset })
    }

    #[must_use]
    pub fn format(&self, timestamp: &DateTime<Utc>) -> String {
        timestamp
            .with_timezone(&self.offset)
            .format(DATE_PATTERN)
            .to_string()
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::local()
    }
}

/// CSS-style class of the status badge.
#[must_use]
pub fn status_class(status: &Status) -> &'static str {
    match status {
        Status::InProgress => "status-in-progress",
        Status::Resolved => "status-resolved",
        Status::Open | Status::Custom(_) => "status-open",
    }
}

/// Editable part of a card, present only in committee mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitteeForm {
    /// Issue the submission applies to.
    pub issue_id: String,
    /// Status the selector starts on.
    pub selected_status: Status,
    pub status_options: Vec<Status>,
    /// Note field, always empty on a fresh render.
    pub note: String,
}

/// Everything one issue card shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueCard {
    pub id: String,
    pub header: String,
    pub meta: String,
    pub description: String,
    pub id_label: String,
    pub status: Status,
    pub status_class: &'static str,
    pub updates: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committee_form: Option<CommitteeForm>,
}

/// Project an issue into a card.
///
/// In committee mode the card carries a form pre-filled with the current
/// status. A status none of the options match starts the selector on Open.
#[must_use]
pub fn render_card(issue: &Issue, committee_mode: bool, dates: &DateFormat) -> IssueCard {
    let updates = if issue.updates.is_empty() {
        vec![NO_UPDATES.to_string()]
    } else {
        issue
            .updates
            .iter()
            .map(|update| format!("{} — {}", dates.format(&update.timestamp), update.text))
            .collect()
    };

    let committee_form = committee_mode.then(|| CommitteeForm {
        issue_id: issue.id.clone(),
        selected_status: if issue.status.is_standard() {
            issue.status.clone()
        } else {
            Status::Open
        },
        status_options: Status::SELECTABLE.to_vec(),
        note: String::new(),
    });

    IssueCard {
        id: issue.id.clone(),
        header: format!("{}: {}", issue.category, issue.issue_title),
        meta: format!(
            "{} ({}) • {}",
            issue.resident_name,
            issue.unit_number,
            dates.format(&issue.created_at)
        ),
        description: issue.issue_description.clone(),
        id_label: format!("Issue ID: {}", issue.id),
        status: issue.status.clone(),
        status_class: status_class(&issue.status),
        updates,
        committee_form,
    }
}
