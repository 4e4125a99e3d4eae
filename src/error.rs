//! Error types for sheetstamp operations

use std::io;
use thiserror::Error;

/// Main error type for sheetstamp operations
#[derive(Debug, Error)]
pub enum StampError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing DXF content
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid DXF group code line
    #[error("Invalid DXF code at line {line}: '{value}'")]
    InvalidDxfCode {
        /// 1-based line number in the source file
        line: usize,
        /// The offending code line
        value: String,
    },

    /// File is not in a supported DXF format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error serializing a document back to bytes
    #[error("Write error: {0}")]
    Write(String),

    /// Error reading or writing a ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// Result type alias for sheetstamp operations
pub type Result<T> = std::result::Result<T, StampError>;

impl From<String> for StampError {
    fn from(s: String) -> Self {
        StampError::Parse(s)
    }
}
