//! Login gate for the portal.
//!
//! Identity is a stored display name, nothing more. Logging out removes the
//! session key and leaves every other key alone.

use tracing::{info, warn};

use crate::error::Result;
use crate::model::{LoginMethod, Session};
use crate::storage::KeyValueStorage;

/// Storage key holding the signed-in resident.
pub const DEFAULT_USER_KEY: &str = "oxy-beaumonde-user";

/// Display name used by the one-click Google login.
pub const GOOGLE_RESIDENT: &str = "Google Resident";

/// Persists who is logged in under its own key.
pub struct SessionGate<S: KeyValueStorage> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> SessionGate<S> {
    #[must_use]
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The stored session, if any.
    ///
    /// An unreadable or undecodable session counts as logged out.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read session");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(key = %self.key, error = %e, "ignoring corrupt session");
                None
            }
        }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.current().is_some()
    }

    /// Mock Google sign-in with a fixed identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be stored.
    pub fn login_google(&mut self) -> Result<Session> {
        self.store(Session {
            name: GOOGLE_RESIDENT.to_string(),
            mobile: "N/A".to_string(),
            method: LoginMethod::Google,
        })
    }

    /// Sign in with a typed name and mobile number (trimmed, not validated).
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be stored.
    pub fn login_manual(&mut self, name: &str, mobile: &str) -> Result<Session> {
        self.store(Session {
            name: name.trim().to_string(),
            mobile: mobile.trim().to_string(),
            method: LoginMethod::Manual,
        })
    }

    /// Forget the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session key cannot be removed.
    pub fn logout(&mut self) -> Result<()> {
        self.storage.remove_item(&self.key)?;
        info!("logged out");
        Ok(())
    }

    fn store(&mut self, session: Session) -> Result<Session> {
        let json = serde_json::to_string(&session)?;
        self.storage.set_item(&self.key, &json)?;
        info!(name = %session.name, method = ?session.method, "logged in");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn gate() -> SessionGate<MemoryStorage> {
        SessionGate::new(MemoryStorage::new(), DEFAULT_USER_KEY)
    }

    #[test]
    fn test_starts_logged_out() {
        assert!(!gate().is_logged_in());
    }

    #[test]
    fn test_google_login() {
        let mut gate = gate();
        let session = gate.login_google().unwrap();
        assert_eq!(session.name, "Google Resident");
        assert_eq!(session.mobile, "N/A");
        assert_eq!(gate.current(), Some(session));
    }

    #[test]
    fn test_manual_login_trims() {
        let mut gate = gate();
        let session = gate.login_manual("  Meera Iyer ", " 98450 12345").unwrap();
        assert_eq!(session.name, "Meera Iyer");
        assert_eq!(session.mobile, "98450 12345");
        assert_eq!(session.method, LoginMethod::Manual);
    }

    #[test]
    fn test_logout_clears_session() {
        let mut gate = gate();
        gate.login_google().unwrap();
        gate.logout().unwrap();
        assert!(gate.current().is_none());
        gate.logout().unwrap();
    }

    #[test]
    fn test_corrupt_session_is_logged_out() {
        let mut storage = MemoryStorage::new();
        storage.set_item(DEFAULT_USER_KEY, "nope").unwrap();
        let gate = SessionGate::new(storage, DEFAULT_USER_KEY);
        assert!(gate.current().is_none());
    }
}
