//! Unified error types for grind_engine

use std::path::PathBuf;
use thiserror::Error;

use crate::Position;

/// Main error type for grind_engine operations
///
/// Malformed map text is never an error; see [`crate::formats::FormatWarning`].
#[derive(Debug, Error)]
pub enum EngineError {
    // === I/O Errors ===
    #[error("Failed to open file '{path}': {message}")]
    OpenFile { path: PathBuf, message: String },

    #[error("Failed to write file '{path}': {message}")]
    WriteFile { path: PathBuf, message: String },

    #[error("No file name set for this map")]
    NoFileName,

    // === Document Errors ===
    #[error("Position {pos} is outside the {width}x{height} map")]
    OutOfBounds { pos: Position, width: i32, height: i32 },

    #[error("Invalid map dimensions {width}x{height} (allowed 1..={max})")]
    InvalidDimensions { width: i32, height: i32, max: i32 },

    #[error("Metadata key '{key}' is derived from the map and can't be changed directly")]
    ReservedMetadataKey { key: String },

    #[error("Metadata entry '{key}' can't contain line breaks or '=' in its key")]
    InvalidMetadata { key: String },
}

/// Result type alias for grind_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Create an open file error
    pub fn open_file(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::OpenFile {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a write file error
    pub fn write_file(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::WriteFile {
            path: path.into(),
            message: msg.into(),
        }
    }
}
