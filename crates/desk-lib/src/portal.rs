//! View controller: maps portal events to store operations and re-renders.
//!
//! Every event returns a freshly rendered [`PortalView`]; the board is
//! recomputed from scratch each time.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{DeskError, Result};
use crate::model::{Issue, NewIssue, Session, Status};
use crate::query::{StatusFilter, filter_issues};
use crate::render::{DateFormat, IssueCard, render_card};
use crate::session::SessionGate;
use crate::storage::KeyValueStorage;
use crate::store::{IssueStore, Notice};

/// Current toggle, filter and search values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub committee_mode: bool,
    pub status_filter: StatusFilter,
    pub query: String,
}

/// The visible board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    /// `Logged in as {name}` when the portal is gated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welcome: Option<String>,
    pub committee_mode: bool,
    pub cards: Vec<IssueCard>,
    /// True when no card passes the filters.
    pub empty: bool,
    /// Issues in the store, before filtering.
    pub total: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
}

/// What the portal shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum PortalView {
    LoggedOut,
    Board(Board),
}

impl PortalView {
    #[must_use]
    pub const fn board(&self) -> Option<&Board> {
        match self {
            Self::Board(board) => Some(board),
            Self::LoggedOut => None,
        }
    }
}

/// Portal over one storage scope, optionally behind a login gate.
pub struct Portal<S: KeyValueStorage> {
    store: IssueStore<S>,
    gate: Option<SessionGate<S>>,
    view: ViewState,
    dates: DateFormat,
    notices: Vec<Notice>,
}

impl<S: KeyValueStorage> Portal<S> {
    #[must_use]
    pub fn new(store: IssueStore<S>, gate: Option<SessionGate<S>>, dates: DateFormat) -> Self {
        Self {
            store,
            gate,
            view: ViewState::default(),
            dates,
            notices: Vec::new(),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &IssueStore<S> {
        &self.store
    }

    #[must_use]
    pub const fn view_state(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub const fn is_gated(&self) -> bool {
        self.gate.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.gate.as_ref().and_then(SessionGate::current)
    }

    /// Whether the board is shown: always when ungated, else only with a session.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.gate.as_ref().is_none_or(SessionGate::is_logged_in)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// New-issue form submitted.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` when the portal is hidden, or a storage error
    /// if the new issue cannot be persisted.
    pub fn submit_issue(&mut self, input: &NewIssue) -> Result<(Issue, PortalView)> {
        self.ensure_visible()?;
        let created = self.store.create(input);
        let issue = self.note_failure(created)?;
        Ok((issue, self.render()))
    }

    /// Committee form on one card submitted.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` when the portal is hidden, `CommitteeModeOff`
    /// when committee mode is off, `IssueNotFound` for an unknown ID, or a
    /// storage error if the change cannot be persisted.
    pub fn submit_committee_update(
        &mut self,
        issue_id: &str,
        status: Status,
        note: &str,
    ) -> Result<(Issue, PortalView)> {
        self.ensure_visible()?;
        if !self.view.committee_mode {
            return Err(DeskError::CommitteeModeOff);
        }
        let updated = self.store.append_update(issue_id, status, note);
        let issue = self.note_failure(updated)?;
        Ok((issue, self.render()))
    }

    pub fn set_committee_mode(&mut self, enabled: bool) -> PortalView {
        self.view.committee_mode = enabled;
        self.render()
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) -> PortalView {
        self.view.status_filter = filter;
        self.render()
    }

    pub fn set_search(&mut self, query: &str) -> PortalView {
        query.clone_into(&mut self.view.query);
        self.render()
    }

    /// # Errors
    ///
    /// Returns `Config` when the portal has no login gate, or a storage
    /// error if the session cannot be stored.
    pub fn login_google(&mut self) -> Result<PortalView> {
        self.gate_mut()?.login_google()?;
        Ok(self.render())
    }

    /// # Errors
    ///
    /// Returns `Config` when the portal has no login gate, or a storage
    /// error if the session cannot be stored.
    pub fn login_manual(&mut self, name: &str, mobile: &str) -> Result<PortalView> {
        self.gate_mut()?.login_manual(name, mobile)?;
        Ok(self.render())
    }

    /// Clears the session only; issues stay in storage.
    ///
    /// # Errors
    ///
    /// Returns `Config` when the portal has no login gate, or a storage
    /// error if the session key cannot be removed.
    pub fn logout(&mut self) -> Result<PortalView> {
        self.gate_mut()?.logout()?;
        Ok(self.render())
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the current state, draining pending notices into the board.
    pub fn render(&mut self) -> PortalView {
        if !self.is_visible() {
            return PortalView::LoggedOut;
        }

        let visible = filter_issues(
            self.store.issues(),
            &self.view.status_filter,
            &self.view.query,
        );
        let cards: Vec<IssueCard> = visible
            .into_iter()
            .map(|issue| render_card(issue, self.view.committee_mode, &self.dates))
            .collect();
        debug!(
            shown = cards.len(),
            total = self.store.len(),
            filter = %self.view.status_filter,
            query = %self.view.query,
            "rendered board"
        );

        let mut notices = self.store.take_notices();
        notices.append(&mut self.notices);

        PortalView::Board(Board {
            welcome: self
                .session()
                .map(|session| format!("Logged in as {}", session.name)),
            committee_mode: self.view.committee_mode,
            empty: cards.is_empty(),
            total: self.store.len(),
            cards,
            notices,
        })
    }

    /// Render a single issue as a card, ignoring the filters.
    ///
    /// # Errors
    ///
    /// Returns `NotLoggedIn` when the portal is hidden, or `IssueNotFound`.
    pub fn card(&self, issue_id: &str) -> Result<IssueCard> {
        self.ensure_visible()?;
        let issue = self.store.get(issue_id)?;
        Ok(render_card(issue, self.view.committee_mode, &self.dates))
    }

    fn ensure_visible(&self) -> Result<()> {
        if self.is_visible() {
            Ok(())
        } else {
            Err(DeskError::NotLoggedIn)
        }
    }

    fn gate_mut(&mut self) -> Result<&mut SessionGate<S>> {
        self.gate
            .as_mut()
            .ok_or_else(|| DeskError::Config("login is disabled (require_login: false)".to_string()))
    }

    /// Storage failures become a notice as well as an error.
    fn note_failure<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e @ (DeskError::Storage(_) | DeskError::Io(_) | DeskError::Json(_))) = &result {
            warn!(error = %e, "change could not be saved");
            self.notices
                .push(Notice::new(format!("Your change could not be saved: {e}")));
        }
        result
    }
}
