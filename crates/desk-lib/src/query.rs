//! Status filter and free-text search over the issue list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{Issue, Status};

/// Which statuses the board shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(&self, status: &Status) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = crate::error::DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Case-insensitive search over title, resident name and unit number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.trim().to_lowercase(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        [&issue.issue_title, &issue.resident_name, &issue.unit_number]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Issues passing both the status filter and the search query, in stored
/// (newest-first) order.
#[must_use]
pub fn filter_issues<'a>(
    issues: &'a [Issue],
    status_filter: &StatusFilter,
    query: &str,
) -> Vec<&'a Issue> {
    let query = SearchQuery::new(query);
    issues
        .iter()
        .filter(|issue| status_filter.matches(&issue.status) && query.matches(issue))
        .collect()
}
