//! In-memory issue store persisted as one JSON array.
//!
//! The store owns the newest-first list of issues. Every mutation rewrites
//! the whole array under the store's key; there are no partial writes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{DeskError, Result};
use crate::model::{Issue, NewIssue, Status, Update};
use crate::storage::KeyValueStorage;

/// Storage key holding the issue array.
pub const DEFAULT_ISSUES_KEY: &str = "oxy-beaumonde-issues";

pub use crate::storage::QUARANTINE_SUFFIX;

/// A non-fatal problem worth showing to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Issue store over a key-value storage scope.
pub struct IssueStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    issues: Vec<Issue>,
    notices: Vec<Notice>,
}

impl<S: KeyValueStorage> IssueStore<S> {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Open the store and load whatever is persisted under `key`.
    ///
    /// Never fails: missing data yields the sample issue, unreadable or
    /// corrupt data yields the sample issue plus a notice.
    #[must_use]
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            issues: Vec::new(),
            notices: Vec::new(),
        };
        store.load();
        store
    }

    /// Replace the in-memory list with the persisted one.
    ///
    /// A missing key is seeded and the sample written back at once, so the
    /// sample keeps its ID across loads. Corrupt data is seeded the same way
    /// once the raw value is quarantined; if quarantine fails the raw value
    /// is left in place.
    pub fn load(&mut self) {
        let raw = match self.storage.get_item(&self.key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read issues; reseeding");
                self.notices.push(Notice::new(format!(
                    "Saved issues could not be read ({e}); showing sample data."
                )));
                self.issues = seed_issues(Utc::now());
                return;
            }
        };

        let Some(raw) = raw else {
            debug!(key = %self.key, "no saved issues; seeding sample issue");
            self.issues = seed_issues(Utc::now());
            self.persist_seed();
            return;
        };

        match serde_json::from_str::<Vec<Issue>>(&raw) {
            Ok(issues) => {
                debug!(key = %self.key, count = issues.len(), "loaded issues");
                self.issues = issues;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "saved issues are corrupt; reseeding");
                let quarantine_key = format!("{}{QUARANTINE_SUFFIX}", self.key);
                let quarantined = match self.storage.set_item(&quarantine_key, &raw) {
                    Ok(()) => true,
                    Err(qe) => {
                        warn!(key = %quarantine_key, error = %qe, "failed to quarantine corrupt issues");
                        false
                    }
                };
                let kept = if quarantined {
                    format!(" The unreadable data was kept under '{quarantine_key}'.")
                } else {
                    String::new()
                };
                self.notices.push(Notice::new(format!(
                    "Saved issues were corrupt ({e}) and have been replaced with sample data.{kept}"
                )));
                self.issues = seed_issues(Utc::now());
                if quarantined {
                    self.persist_seed();
                }
            }
        }
    }

    fn persist_seed(&mut self) {
        if let Err(e) = self.save() {
            warn!(key = %self.key, error = %e, "failed to save sample issue");
            self.notices.push(Notice::new(format!(
                "Sample data could not be saved ({e}); it will change on the next load."
            )));
        }
    }

    /// Persist the full list under the store's key.
    ///
    /// # Errors
    ///
    /// Returns `Json` if serialization fails or a storage error if the
    /// write fails.
    pub fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.issues)?;
        self.storage.set_item(&self.key, &json)?;
        debug!(key = %self.key, count = self.issues.len(), "saved issues");
        Ok(())
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Drain notices gathered since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create an issue from submitted form values and persist.
    ///
    /// Fields are trimmed; blank fields are stored as-is.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persisting fails. The issue stays in
    /// memory in that case.
    pub fn create(&mut self, input: &NewIssue) -> Result<Issue> {
        let fields = input.trimmed();
        let blank = fields.blank_fields();
        if !blank.is_empty() {
            debug!(fields = ?blank, "accepting issue with blank fields");
        }

        let id = crate::util::generate_id(&mut rand::rng(), |id| self.contains(id));
        let issue = Issue {
            id,
            resident_name: fields.resident_name,
            unit_number: fields.unit_number,
            contact_number: fields.contact_number,
            category: fields.category,
            issue_title: fields.issue_title,
            issue_description: fields.issue_description,
            status: Status::Open,
            created_at: Utc::now(),
            updates: Vec::new(),
        };

        self.issues.insert(0, issue.clone());
        info!(id = %issue.id, title = %issue.issue_title, "created issue");
        self.save()?;
        Ok(issue)
    }

    /// Set an issue's status and, when `note` is not blank, prepend it to
    /// the update history. Persists in both cases.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if no issue has `id` (nothing is written),
    /// or a storage error if persisting fails.
    pub fn append_update(&mut self, id: &str, status: Status, note: &str) -> Result<Issue> {
        let issue = self
            .issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or_else(|| DeskError::IssueNotFound { id: id.to_string() })?;

        let old_status = std::mem::replace(&mut issue.status, status);
        let note = note.trim();
        if !note.is_empty() {
            issue.updates.insert(
                0,
                Update {
                    text: note.to_string(),
                    timestamp: Utc::now(),
                },
            );
        }
        info!(
            id,
            from = %old_status,
            to = %issue.status,
            noted = !note.is_empty(),
            "committee update"
        );

        let updated = issue.clone();
        self.save()?;
        Ok(updated)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All issues, newest first.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Get a single issue by ID.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the issue doesn't exist.
    pub fn get(&self, id: &str) -> Result<&Issue> {
        self.issues
            .iter()
            .find(|issue| issue.id == id)
            .ok_or_else(|| DeskError::IssueNotFound { id: id.to_string() })
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.issues.iter().any(|issue| issue.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// The collection a fresh storage scope starts with.
#[must_use]
pub fn seed_issues(now: DateTime<Utc>) -> Vec<Issue> {
    vec![Issue {
        id: crate::util::generate_id(&mut rand::rng(), |_| false),
        resident_name: "Sample Resident".to_string(),
        unit_number: "A-101".to_string(),
        contact_number: "+91 90000 00000".to_string(),
        category: "Maintenance".to_string(),
        issue_title: "Lift not working on odd floors".to_string(),
        issue_description: "The right-side lift stops at 3rd floor and does not move further."
            .to_string(),
        status: Status::Open,
        created_at: now,
        updates: vec![Update {
            text: "Complaint received and vendor informed.".to_string(),
            timestamp: now,
        }],
    }]
}
