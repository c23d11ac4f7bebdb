//! Data Transfer Objects for request/response serialization.

pub mod health;
pub mod login;
