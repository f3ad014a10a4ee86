use desk_lib::{Issue, Notice, Session};
use serde::Serialize;

/// Result of `desk submit`.
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedIssue {
    #[serde(flatten)]
    pub issue: Issue,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
}

/// Result of `desk whoami` and the login commands.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub gated: bool,
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
}

/// Result of `desk version`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionOutput<'a> {
    pub version: &'a str,
    pub build: &'a str,
}

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> desk_lib::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
