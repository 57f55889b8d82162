use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or loading a translation table
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to read translation file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse translation JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid translation table: {0}")]
    InvalidShape(String),

    #[error("Invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Could not detect a language from path {}", .0.display())]
    UnknownLanguage(PathBuf),
}
