//! Error types for pwmigrate
//!
//! This module provides structured error handling using thiserror.

use std::path::PathBuf;

use pwmigrate_ast::AstError;
use thiserror::Error;

/// Result type alias for migration operations
pub type Result<T> = std::result::Result<T, MigrateError>;

/// Errors that can occur while migrating spec and config files
#[derive(Error, Debug)]
pub enum MigrateError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The file extension maps to no supported language
    #[error("Unsupported file type: {path}")]
    UnsupportedFile { path: PathBuf },

    /// File larger than the configured limit
    #[error("File too large: {path} ({size} bytes, limit {limit})")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parse or edit failure in the syntax layer
    #[error("Syntax error: {0}")]
    Ast(#[from] AstError),

    /// Invalid glob pattern
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] globset::Error),

    /// UTF-8 encoding error
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<MigrateError>,
    },
}

impl MigrateError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        MigrateError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        MigrateError::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}
