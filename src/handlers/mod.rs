//! HTTP request handlers.

mod health;
mod home;
mod login;
mod profile;

pub use health::health_handler;
pub use home::home_handler;
pub use login::{login_handler, logout_handler};
pub use profile::profile_handler;

use serde_json::Value;
use tower_sessions::Session;

/// Session key for the one-shot success message.
pub const FLASH_KEY: &str = "flash";

/// Reads a one-shot message and removes it from the session.
///
/// Non-string values are removed as well but read as `None`.
async fn pop_message(
    session: &Session,
    key: &str,
) -> Result<Option<String>, tower_sessions::session::Error> {
    Ok(match session.remove_value(key).await? {
        Some(Value::String(message)) => Some(message),
        _ => None,
    })
}
