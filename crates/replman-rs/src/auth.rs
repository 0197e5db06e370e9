//! Session auth-header storage
//!
//! Holds the credentials the console sends with every request. The storage is
//! process-wide and shared: the UI writes it on login/logout, the polling
//! engine only asks whether headers are present.

use base64::Engine;
use std::sync::{Arc, RwLock};

/// The headers attached to every authenticated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// Value of the `Authorization` header
    pub authorization: String,
}

impl AuthHeaders {
    /// Build basic-auth headers from a user/password pair
    pub fn basic(user: &str, password: &str) -> Self {
        let token = base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", user, password));
        Self {
            authorization: format!("Basic {}", token),
        }
    }
}

/// Shared session state, cheap to clone
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    headers: Arc<RwLock<Option<AuthHeaders>>>,
}

impl AuthSession {
    /// Create an unauthenticated session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session already holding basic-auth credentials
    pub fn with_basic(user: &str, password: &str) -> Self {
        let session = Self::new();
        session.login(user, password);
        session
    }

    /// Store basic-auth credentials for subsequent requests
    pub fn login(&self, user: &str, password: &str) {
        let mut guard = self.headers.write().unwrap();
        *guard = Some(AuthHeaders::basic(user, password));
    }

    /// Discard the stored credentials
    pub fn logout(&self) {
        let mut guard = self.headers.write().unwrap();
        *guard = None;
    }

    /// Whether credentials are currently stored
    pub fn has_auth_headers(&self) -> bool {
        self.headers.read().unwrap().is_some()
    }

    /// Current `Authorization` header value, if any
    pub fn authorization(&self) -> Option<String> {
        self.headers
            .read()
            .unwrap()
            .as_ref()
            .map(|h| h.authorization.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_logout() {
        let session = AuthSession::new();
        assert!(!session.has_auth_headers());

        session.login("admin", "repman");
        assert!(session.has_auth_headers());
        assert!(session.authorization().unwrap().starts_with("Basic "));

        session.logout();
        assert!(!session.has_auth_headers());
        assert!(session.authorization().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let session = AuthSession::new();
        let other = session.clone();

        session.login("admin", "repman");
        assert!(other.has_auth_headers());

        other.logout();
        assert!(!session.has_auth_headers());
    }

    #[test]
    fn test_basic_header_encoding() {
        let headers = AuthHeaders::basic("admin", "repman");
        // base64("admin:repman")
        assert_eq!(headers.authorization, "Basic YWRtaW46cmVwbWFu");
    }
}
