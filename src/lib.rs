//! Catalog backend for live sports streams
//!
//! An authenticated admin API manages categories, channels, events and
//! their stream sources in SQLite; a public read API serves the same data to
//! client apps as time-salted, obfuscated JSON.

pub mod assets;
pub mod config;
pub mod database;
pub mod errors;
pub mod models;
pub mod obfuscation;
pub mod web;
