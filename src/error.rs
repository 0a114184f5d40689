//! Unified error types for kapoview
//!
//! Provides a consistent error handling approach across all modules.

use std::path::PathBuf;

/// Unified error type for kapoview operations
#[derive(Debug, thiserror::Error)]
pub enum KapoviewError {
    /// I/O errors (state file, config file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Rejected sort request
    #[error("Sort error: {0}")]
    Sort(String),

    /// Rejected table option update
    #[error("Update error: {0}")]
    Update(String),

    /// Persisted state could not be used
    #[error("Persist error: {path} - {reason}")]
    Persist { path: PathBuf, reason: String },

    /// Selection script errors
    #[error("Script error: line {line}: {reason}")]
    Script { line: usize, reason: String },

    /// Table name outside the known set
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// Column name outside a table's column set
    #[error("Unknown column '{column}' for table {table}")]
    UnknownColumn { table: String, column: String },
}

/// Convenience Result type using KapoviewError
pub type Result<T> = std::result::Result<T, KapoviewError>;

impl KapoviewError {
    /// Create a Config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a Sort error
    pub fn sort(msg: impl Into<String>) -> Self {
        Self::Sort(msg.into())
    }

    /// Create an Update error
    pub fn update(msg: impl Into<String>) -> Self {
        Self::Update(msg.into())
    }

    /// Create a Persist error
    pub fn persist(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Persist {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a Script error
    pub fn script(line: usize, reason: impl Into<String>) -> Self {
        Self::Script {
            line,
            reason: reason.into(),
        }
    }

    /// Create an UnknownColumn error
    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }
}
