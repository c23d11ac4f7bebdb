//! DTOs for the login form.

use serde::Deserialize;

/// `application/x-www-form-urlencoded` body of `POST /login`.
///
/// Missing fields deserialize as empty strings so validation can report
/// them instead of the extractor rejecting the request.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// Both fields are required and must not be blank.
    pub fn is_valid(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.trim().is_empty()
    }
}
