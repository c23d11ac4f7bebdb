//! # Session Gate
//!
//! A small axum web front that resolves each client's IP into the request
//! context and keeps protected pages behind a session login.
//!
//! ## Layers
//!
//! - **Middleware** ([`middleware`]) - client-IP context, session auth gate, tracing
//! - **Sessions** ([`session`]) - `tower-sessions` over Redis or memory
//! - **Handlers** ([`handlers`]) - home, login/logout, profile, health
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"  # Optional, in-memory otherwise
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod session;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::error::AppError;
    pub use crate::middleware::{ClientIp, ip_from_context};
    pub use crate::session::{MemoryStore, RedisStore, SessionBackend, SessionHealth};
    pub use crate::state::{AppState, SessionSettings};
    pub use tower_sessions::Session;
}
