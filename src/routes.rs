//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`              - Home page with login form (public)
//! - `POST /login`         - Log in (public)
//! - `POST /logout`        - Log out (public)
//! - `GET  /health`        - Health check (public)
//! - `GET  /user/profile`  - Profile page (session login required)
//!
//! # Middleware
//!
//! Outermost first:
//!
//! - **Tracing** - Structured request/response logging
//! - **Session** - Binds the request to a cookie-correlated session
//! - **IP context** - Stores the resolved client IP in the request context
//! - **Authentication** - Session gate on protected routes only

use crate::handlers::{
    health_handler, home_handler, login_handler, logout_handler, profile_handler,
};
use crate::middleware::{auth, ip_context, tracing};
use crate::session;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_sessions::SessionStore;

/// Routes that require a logged-in session.
///
/// # Endpoints
///
/// - `GET /user/profile` - Profile page for the current user
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/user/profile", get(profile_handler))
        .route_layer(middleware::from_fn(auth::layer))
}

/// Routes open to anonymous clients.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/health", get(health_handler))
}

/// Constructs the application router with all routes and middleware.
///
/// Sessions are kept in `store`. The returned router expects
/// `ConnectInfo<SocketAddr>` from the server (see [`crate::server::run`]);
/// without it client IPs resolve to `"unknown"`.
pub fn app_router<S: SessionStore + Clone>(state: AppState, store: S) -> Router {
    let sessions = session::manager_layer(store, &state.session_settings);

    Router::new()
        .merge(public_routes())
        .merge(protected_routes())
        .layer(middleware::from_fn(ip_context::layer))
        .layer(sessions)
        .with_state(state)
        .layer(tracing::layer())
}
