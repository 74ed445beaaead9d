//! Snapshot store for regional weekly forecasts
//!
//! SQLite schema with two master tables (regions, weather codes) and an
//! append-only pair of forecast header / daily row tables. The schema is
//! created on open; there are no migrations.

pub mod client;
pub mod queries;
pub mod schema;

pub use client::*;
pub use schema::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Snapshot for region {0} has no daily rows")]
    EmptySnapshot(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type DbResult<T> = Result<T, DbError>;
