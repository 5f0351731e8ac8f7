//! Tool definitions for map editing
//!
//! Tools only describe what a click on the grid does; [`crate::MapEditor::apply_tool`]
//! carries it out.

use grind_engine::{EXIT_GLYPH, Position, TELEPORT_GLYPH};

/// Available editing tools
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Paint the active glyph (freehand)
    #[default]
    Pencil,
    /// Clear cells to void
    Eraser,
    /// Flood fill area
    Fill,
    /// Place an exit marker and its trigger
    Exit,
    /// Place a teleport marker and its trigger
    Teleport,
}

impl Tool {
    pub const ALL: [Tool; 5] = [Tool::Pencil, Tool::Eraser, Tool::Fill, Tool::Exit, Tool::Teleport];

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pencil => "Pencil",
            Tool::Eraser => "Eraser",
            Tool::Fill => "Fill",
            Tool::Exit => "Exit",
            Tool::Teleport => "Teleport",
        }
    }

    /// Get the keyboard shortcut
    pub fn shortcut(&self) -> char {
        match self {
            Tool::Pencil => 'p',
            Tool::Eraser => 'e',
            Tool::Fill => 'f',
            Tool::Exit => 'x',
            Tool::Teleport => 't',
        }
    }

    pub fn from_shortcut(ch: char) -> Option<Tool> {
        Tool::ALL.into_iter().find(|tool| tool.shortcut() == ch.to_ascii_lowercase())
    }

    /// Marker glyph written by trigger tools
    pub fn marker_glyph(&self) -> Option<char> {
        match self {
            Tool::Exit => Some(EXIT_GLYPH),
            Tool::Teleport => Some(TELEPORT_GLYPH),
            _ => None,
        }
    }

    /// Trigger tools need target data from the user before anything is placed
    pub fn is_trigger_tool(&self) -> bool {
        matches!(self, Tool::Exit | Tool::Teleport)
    }

    /// Check if this tool keeps painting while dragging
    pub fn needs_drag(&self) -> bool {
        matches!(self, Tool::Pencil | Tool::Eraser)
    }
}

/// Tool event returned from tool operations
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolEvent {
    /// No action needed
    None,
    /// A single cell changed and needs a redraw
    CellChanged(Position),
    /// A fill changed this many cells; redraw everything
    RegionChanged(usize),
    /// The collaborator has to ask for trigger targets, then call
    /// `place_exit`/`place_teleport` with them
    RequestTrigger { tool: Tool, pos: Position },
}
