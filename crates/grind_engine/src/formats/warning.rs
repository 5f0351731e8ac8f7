use thiserror::Error;

use crate::Position;

/// Why a trigger header line was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerFieldError {
    #[error("field '{0}' has no '='")]
    MissingEquals(String),

    #[error("field '{field}' is not an integer: '{value}'")]
    NotAnInteger { field: String, value: String },

    #[error("missing required field '{0}'")]
    MissingField(&'static str),
}

/// A recoverable problem found while loading a map.
///
/// Loading never fails on content; every warning describes input that was
/// skipped or replaced by a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatWarning {
    #[error("line {line}: meta entry without '=': '{text}'")]
    MalformedMeta { line: usize, text: String },

    #[error("line {line}: dropped {keyword} trigger: {reason}")]
    MalformedTrigger {
        line: usize,
        keyword: &'static str,
        reason: TriggerFieldError,
    },

    #[error("invalid map {key} '{value}', falling back to the default size")]
    InvalidDimension { key: &'static str, value: String },

    #[error("line {line}: trigger at {pos} lies outside the {width}x{height} map")]
    TriggerOutOfBounds { line: usize, pos: Position, width: i32, height: i32 },
}
