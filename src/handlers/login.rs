//! Login and logout handlers.

use axum::{Form, response::Redirect};
use tower_sessions::Session;
use tracing::info;

use super::FLASH_KEY;
use crate::dto::login::LoginForm;
use crate::error::AppError;
use crate::middleware::auth::{ERROR_KEY, USER_KEY};

/// Handles the login form.
///
/// # Endpoint
///
/// `POST /login` (`application/x-www-form-urlencoded`)
///
/// # Behavior
///
/// - Blank `email` or `password`: stores `"Invalid login!"` under `"error"`
///   and redirects to `/`
/// - Otherwise: issues a new session id, stores the email under `"user"`,
///   a greeting under `"flash"`, and redirects to `/user/profile`
///
/// Both redirects are `303 See Other`. Credentials are not checked against
/// a user directory.
pub async fn login_handler(
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    if !form.is_valid() {
        session.insert(ERROR_KEY, "Invalid login!").await?;
        return Ok(Redirect::to("/"));
    }

    // a session id seen before login must not carry the login
    session.cycle_id().await?;
    session.insert(USER_KEY, form.email.trim()).await?;
    session.insert(FLASH_KEY, "Successfully logged in!").await?;
    info!(user = %form.email.trim(), "User logged in");

    Ok(Redirect::to("/user/profile"))
}

/// Ends the session.
///
/// # Endpoint
///
/// `POST /logout` → `303 See Other` to `/`
pub async fn logout_handler(session: Session) -> Result<Redirect, AppError> {
    session.flush().await?;
    Ok(Redirect::to("/"))
}
