//! Centralized error handling
//!
//! All fallible library code returns [`AppResult`]. [`AppError`] knows how to
//! turn itself into an HTTP response, so handlers can simply use `?`.
//!
//! # Error Categories
//!
//! - **Database Errors**: SQLite statements and migrations
//! - **Validation Errors**: missing required fields, malformed ids
//! - **Authorization Errors**: missing or wrong admin bearer token
//! - **Rate Limit Errors**: per-client request ceiling exceeded

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
