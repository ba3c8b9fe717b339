//! Testudo Bank storage layer.
//!
//! Domain models for customers, their credentials and overdraft history, plus
//! the [`database::Database`] handle that owns the single MySQL connection
//! used by the bank's administrative tools.

pub mod config;
pub mod database;
pub mod errors;
pub mod models;

pub use config::ConnectionSettings;
pub use database::Database;
pub use errors::AppError;
