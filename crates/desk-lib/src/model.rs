//! Core data types for desk-lib.
//!
//! Field names serialize in camelCase so the stored JSON array keeps the
//! shape residents' existing data already has.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Issue lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    /// A value found in stored data that no operation here ever writes.
    #[serde(untagged)]
    Custom(String),
}

impl Status {
    /// The three statuses a committee member can pick, in display order.
    pub const SELECTABLE: [Self; 3] = [Self::Open, Self::InProgress, Self::Resolved];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Custom(value) => value,
        }
    }

    #[must_use]
    pub const fn is_standard(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = crate::error::DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in progress" | "in_progress" | "in-progress" | "inprogress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            _ => Err(crate::error::DeskError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// A timestamped committee note in an issue's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Update {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// One resident-submitted complaint and its status history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Display ID (e.g., "OB-4821").
    pub id: String,

    pub resident_name: String,
    pub unit_number: String,
    pub contact_number: String,

    /// Free-text category (Maintenance, Security, ...).
    pub category: String,

    pub issue_title: String,
    pub issue_description: String,

    #[serde(default)]
    pub status: Status,

    /// Creation timestamp, never changed afterwards.
    pub created_at: DateTime<Utc>,

    /// Committee notes, newest first.
    #[serde(default)]
    pub updates: Vec<Update>,
}

/// Field values from the submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    pub resident_name: String,
    pub unit_number: String,
    pub contact_number: String,
    pub category: String,
    pub issue_title: String,
    pub issue_description: String,
}

impl NewIssue {
    /// Copy of the input with surrounding whitespace removed from every field.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            resident_name: self.resident_name.trim().to_string(),
            unit_number: self.unit_number.trim().to_string(),
            contact_number: self.contact_number.trim().to_string(),
            category: self.category.trim().to_string(),
            issue_title: self.issue_title.trim().to_string(),
            issue_description: self.issue_description.trim().to_string(),
        }
    }

    /// Names of the fields that are blank after trimming.
    #[must_use]
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("residentName", &self.resident_name),
            ("unitNumber", &self.unit_number),
            ("contactNumber", &self.contact_number),
            ("category", &self.category),
            ("issueTitle", &self.issue_title),
            ("issueDescription", &self.issue_description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// How a resident signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    Google,
    Manual,
}

impl LoginMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Manual => "manual",
        }
    }
}

/// The signed-in resident, persisted under the session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub mobile: String,
    pub method: LoginMethod,
}
