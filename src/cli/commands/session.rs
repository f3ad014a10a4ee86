//! Login, logout and whoami.
//!
//! These only touch the session key; issues are never cleared.

use desk_lib::{FileStorage, Portal, PortalView, Result};
use tracing::info;

use crate::cli::LoginArgs;
use crate::config::CliOverrides;
use crate::format::{self, SessionStatus};

/// Log in with the mock Google button or a name and mobile number.
///
/// # Errors
///
/// Returns an error if login is disabled or the session cannot be stored.
pub fn login(args: &LoginArgs, json: bool, cli: &CliOverrides) -> Result<()> {
    let mut portal = super::open_portal(cli)?;
    let view = match (&args.name, &args.mobile) {
        (Some(name), Some(mobile)) if !args.google => portal.login_manual(name, mobile)?,
        _ => portal.login_google()?,
    };
    info!(method = if args.google { "google" } else { "manual" }, "logged in");

    if json {
        return format::print_json(&status(&portal));
    }
    match view {
        PortalView::Board(board) => println!(
            "{}",
            board.welcome.as_deref().unwrap_or("Logged in")
        ),
        PortalView::LoggedOut => println!("Not logged in"),
    }
    Ok(())
}

/// Clear the session.
///
/// # Errors
///
/// Returns an error if login is disabled or the session cannot be removed.
pub fn logout(json: bool, cli: &CliOverrides) -> Result<()> {
    let mut portal = super::open_portal(cli)?;
    portal.logout()?;
    info!("logged out");

    if json {
        return format::print_json(&status(&portal));
    }
    println!("Logged out. Issues are kept.");
    Ok(())
}

/// Show the current session.
///
/// # Errors
///
/// Returns an error if config is invalid or JSON serialization fails.
pub fn whoami(json: bool, cli: &CliOverrides) -> Result<()> {
    let portal = super::open_portal(cli)?;
    let status = status(&portal);

    if json {
        return format::print_json(&status);
    }
    match (&status.session, status.gated) {
        (Some(session), _) => println!(
            "{} ({}, {})",
            session.name,
            session.mobile,
            session.method.as_str()
        ),
        (None, true) => println!("Not logged in"),
        (None, false) => println!("Login is not required"),
    }
    Ok(())
}

fn status(portal: &Portal<FileStorage>) -> SessionStatus {
    let session = portal.session();
    SessionStatus {
        gated: portal.is_gated(),
        logged_in: session.is_some(),
        session,
    }
}
