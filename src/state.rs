use std::sync::Arc;

use crate::session::SessionHealth;

/// Cookie parameters for the session layer.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub ttl_seconds: u64,
    /// Sets the `Secure` cookie attribute; enable behind HTTPS.
    pub cookie_secure: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: "session_id".to_string(),
            ttl_seconds: 86_400,
            cookie_secure: false,
        }
    }
}

/// Shared application state injected into middleware and handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionHealth>,
    pub session_settings: SessionSettings,
}

impl AppState {
    pub fn new(sessions: Arc<dyn SessionHealth>, session_settings: SessionSettings) -> Self {
        Self {
            sessions,
            session_settings,
        }
    }
}
