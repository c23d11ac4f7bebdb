//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use tower_sessions::Session;

use super::{FLASH_KEY, pop_message};
use crate::error::AppError;
use crate::middleware::ClientIp;
use crate::middleware::auth::{ERROR_KEY, USER_KEY};

/// Template for the home page.
///
/// Renders `templates/home.html` with:
/// - Client IP resolved by the ip context layer
/// - One-shot error and flash messages
/// - Login form, or the logged-in user
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub ip: String,
    pub error: Option<String>,
    pub flash: Option<String>,
    pub user: Option<String>,
}

/// Renders the home page.
///
/// # Endpoint
///
/// `GET /`
///
/// Pops the `"error"` and `"flash"` session messages, so each is shown once.
pub async fn home_handler(ip: ClientIp, session: Session) -> Result<HomeTemplate, AppError> {
    let error = pop_message(&session, ERROR_KEY).await?;
    let flash = pop_message(&session, FLASH_KEY).await?;
    let user = session.get::<String>(USER_KEY).await?;

    Ok(HomeTemplate {
        ip: ip.into_inner(),
        error,
        flash,
        user,
    })
}
