//! `desk-lib` - In-process resident complaint desk.
//!
//! Residents submit issues, the committee moves them through
//! Open → In Progress → Resolved with dated notes, and everything lives in a
//! local key-value storage scope as one JSON array.
//!
//! # Quick Start
//!
//! ```no_run
//! use desk_lib::{DateFormat, FileStorage, IssueStore, NewIssue, Portal, Status};
//! use desk_lib::store::DEFAULT_ISSUES_KEY;
//!
//! let store = IssueStore::open(FileStorage::new(".desk/data"), DEFAULT_ISSUES_KEY);
//! let mut portal = Portal::new(store, None, DateFormat::local());
//!
//! // Submit
//! let (issue, _view) = portal
//!     .submit_issue(&NewIssue { issue_title: "Gate broken".into(), ..Default::default() })
//!     .unwrap();
//!
//! // Committee update
//! portal.set_committee_mode(true);
//! portal.submit_committee_update(&issue.id, Status::Resolved, "Fixed by vendor").unwrap();
//!
//! // Filter
//! let view = portal.set_search("gate");
//! ```

pub mod error;
pub mod model;
pub mod portal;
pub mod query;
pub mod render;
pub mod session;
pub mod storage;
pub mod store;
pub mod util;

pub use error::{DeskError, Result};
pub use model::{Issue, LoginMethod, NewIssue, Session, Status, Update};
pub use portal::{Board, Portal, PortalView, ViewState};
pub use query::{StatusFilter, filter_issues};
pub use render::{CommitteeForm, DateFormat, IssueCard, render_card, status_class};
pub use session::SessionGate;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{IssueStore, Notice};
