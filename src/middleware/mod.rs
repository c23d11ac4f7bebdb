//! HTTP middleware for request processing and protection.
//!
//! Provides client-IP context, session authentication, and observability middleware.

pub mod auth;
pub mod ip_context;
pub mod tracing;

pub use ip_context::{ClientIp, ip_from_context};
