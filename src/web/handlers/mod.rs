//! HTTP request handlers organized by domain
//!
//! Admin handlers are thin pass-throughs to [`crate::database::Database`];
//! public handlers additionally reshape rows and obfuscate the result.

pub mod categories;
pub mod channels;
pub mod events;
pub mod health;
pub mod public;
pub mod static_assets;
pub mod streams;
