use std::{fs, path::Path};

use crate::{EngineError, MapDocument, Result};

mod map_format;
pub use map_format::{FILE_EXTENSION, ParseReport, TERRAIN_LAYER_MARKER, parse, parse_with_report, serialize};

mod warning;
pub use warning::{FormatWarning, TriggerFieldError};

/// Loads a `.map` file. Only I/O and UTF-8 problems are errors.
///
/// # Errors
///
/// Returns [`EngineError::OpenFile`] if the file can't be read as text.
pub fn load_map(path: &Path) -> Result<ParseReport> {
    let text = fs::read_to_string(path).map_err(|err| EngineError::open_file(path, err.to_string()))?;
    let report = parse_with_report(&text);
    log::info!(
        "loaded '{}' ({}, {} trigger(s), {} warning(s))",
        path.display(),
        report.document.size(),
        report.document.trigger_count(),
        report.warnings.len()
    );
    Ok(report)
}

/// Writes a document as a `.map` file.
///
/// # Errors
///
/// Returns [`EngineError::WriteFile`] if the file can't be written.
pub fn save_map(path: &Path, document: &MapDocument) -> Result<()> {
    fs::write(path, serialize(document)).map_err(|err| EngineError::write_file(path, err.to_string()))?;
    log::info!("saved '{}'", path.display());
    Ok(())
}
