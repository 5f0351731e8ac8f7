//! Editing operations on top of `grind_engine`: flood fill, tools, the glyph
//! palette and the editor session.

mod editor;
pub use editor::MapEditor;

pub mod brushes;
pub use brushes::flood_fill;

pub mod palette;

pub mod tools;
pub use tools::{Tool, ToolEvent};

// Re-export the document types editors work with
pub use grind_engine::{
    EXIT_GLYPH, EngineError, EngineResult, FormatWarning, MapDocument, ParseReport, Position, Size, TELEPORT_GLYPH, Trigger, VOID_GLYPH, formats, limits,
    parse, parse_with_report, serialize,
};
