pub mod catalog;
pub mod sqlite;

pub use catalog::*;
pub use sqlite::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Warehouse unreachable at {path}: {reason}")]
    Unreachable { path: PathBuf, reason: String },

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Schema setup failed at version {version}: {reason}")]
    SchemaFailed { version: i64, reason: String },
}
