//! Session-based authentication gate for protected pages.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::debug;

use crate::error::AppError;

/// Session key whose presence marks a logged-in user.
pub const USER_KEY: &str = "user";

/// Session key for the one-shot error message shown on the next page.
pub const ERROR_KEY: &str = "error";

/// Message stored when an anonymous client hits a protected route.
pub const LOGIN_REQUIRED: &str = "Log in first";

/// Where anonymous clients are sent.
pub const LOGIN_REDIRECT: &str = "/";

/// Lets the request through only if the session has a `"user"` entry.
///
/// # Authentication Flow
///
/// 1. Check the request's session for [`USER_KEY`]
/// 2. If present, continue to the handler untouched
/// 3. If absent, store [`LOGIN_REQUIRED`] under [`ERROR_KEY`] and respond
///    `307 Temporary Redirect` to `/` without calling the handler
///
/// Requires [`crate::session::manager_layer`] further out in the stack.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/user/profile", get(profile_handler))
///     .route_layer(middleware::from_fn(auth::layer));
/// ```
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the session store fails.
pub async fn layer(session: Session, req: Request, next: Next) -> Result<Response, AppError> {
    if session.get_value(USER_KEY).await?.is_none() {
        debug!(path = %req.uri().path(), "Unauthenticated request redirected");
        session.insert(ERROR_KEY, LOGIN_REQUIRED).await?;
        return Ok(Redirect::temporary(LOGIN_REDIRECT).into_response());
    }

    Ok(next.run(req).await)
}
