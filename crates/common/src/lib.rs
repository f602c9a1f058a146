//! Shared utilities, configuration, and error handling for Flightdesk
//!
//! This crate provides common functionality used across the Flightdesk data layer:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Connection pool construction and teardown
//! - Tracing subscriber setup

pub mod config;
pub mod db;
pub mod error;
pub mod telemetry;

pub use config::{Config, DatabaseConfig};
pub use db::Database;
pub use error::{Error, Result};
