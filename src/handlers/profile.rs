//! Profile page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use super::{FLASH_KEY, pop_message};
use crate::error::AppError;
use crate::middleware::ClientIp;
use crate::middleware::auth::{LOGIN_REDIRECT, USER_KEY};

/// Template for the logged-in user's profile page.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub user: String,
    pub ip: String,
    pub flash: Option<String>,
}

/// Renders the profile page.
///
/// # Endpoint
///
/// `GET /user/profile`
///
/// # Authentication
///
/// Mounted behind [`crate::middleware::auth::layer`]. If the user is gone
/// anyway, e.g. a logout finished in between, it redirects to `/` as well.
pub async fn profile_handler(ip: ClientIp, session: Session) -> Result<Response, AppError> {
    let Some(user) = session.get::<String>(USER_KEY).await? else {
        return Ok(Redirect::temporary(LOGIN_REDIRECT).into_response());
    };
    let flash = pop_message(&session, FLASH_KEY).await?;

    Ok(ProfileTemplate {
        user,
        ip: ip.into_inner(),
        flash,
    }
    .into_response())
}
