//! Error types for lastseen-core
//!
//! Formatting never fails; only loading configuration and string tables can.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the lastseen-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// String table could not be read or parsed
    #[error("string table error in {path}: {message}")]
    Strings { path: PathBuf, message: String },
}

/// Result type alias for lastseen-core
pub type Result<T> = std::result::Result<T, Error>;
