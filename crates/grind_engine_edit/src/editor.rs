use std::path::{Path, PathBuf};

use grind_engine::{
    EngineError, EngineResult, FormatWarning, MapDocument, Position, Trigger, VOID_GLYPH, limits, load_map, save_map,
};

use crate::{Tool, ToolEvent, brushes};

/// One editing session: the open map, where it lives on disk and the active
/// glyph and tool. Everything a GUI needs apart from drawing and prompting.
pub struct MapEditor {
    document: MapDocument,
    file_name: Option<PathBuf>,
    active_glyph: String,
    tool: Tool,
    is_dirty: bool,
}

impl Default for MapEditor {
    fn default() -> Self {
        Self::from_document(MapDocument::default())
    }
}

impl MapEditor {
    pub fn from_document(document: MapDocument) -> Self {
        Self {
            document,
            file_name: None,
            active_glyph: "#".to_string(),
            tool: Tool::default(),
            is_dirty: false,
        }
    }

    pub fn get_document(&self) -> &MapDocument {
        &self.document
    }

    /// Direct access marks the session dirty.
    pub fn get_document_mut(&mut self) -> &mut MapDocument {
        self.is_dirty = true;
        &mut self.document
    }

    pub fn get_file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Replaces the document with a blank map.
    ///
    /// # Errors
    ///
    /// Width and height must be within `1..=500`.
    pub fn new_map(&mut self, width: i32, height: i32, name: impl Into<String>) -> EngineResult<()> {
        if !limits::is_valid_new_map_size(width, height) {
            return Err(EngineError::InvalidDimensions {
                width,
                height,
                max: limits::MAX_NEW_MAP_SIZE,
            });
        }
        self.document = MapDocument::new(width, height, name);
        self.file_name = None;
        self.is_dirty = false;
        log::info!("new map {}x{}", width, height);
        Ok(())
    }

    /// Opens a map file, replacing the current document.
    ///
    /// # Errors
    ///
    /// Only I/O failures are errors; content problems come back as warnings.
    pub fn open(&mut self, path: impl Into<PathBuf>) -> EngineResult<Vec<FormatWarning>> {
        let path = path.into();
        let report = load_map(&path)?;
        self.document = report.document;
        self.file_name = Some(path);
        self.is_dirty = false;
        Ok(report.warnings)
    }

    /// Saves to the file the map was opened from or last saved to.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoFileName`] for a map that was never saved.
    pub fn save(&mut self) -> EngineResult<()> {
        let Some(path) = self.file_name.clone() else {
            return Err(EngineError::NoFileName);
        };
        self.save_as(path)
    }

    /// # Errors
    ///
    /// Returns an error if the file can't be written.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> EngineResult<()> {
        let path = path.into();
        save_map(&path, &self.document)?;
        self.file_name = Some(path);
        self.is_dirty = false;
        Ok(())
    }

    /// Only the first character counts; an empty selection paints void.
    pub fn select_glyph(&mut self, glyph: &str) {
        self.active_glyph = glyph.chars().take(1).collect();
    }

    pub fn active_glyph(&self) -> char {
        self.active_glyph.chars().next().unwrap_or(VOID_GLYPH)
    }

    pub fn get_tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Writes the active glyph. Returns true if the cell changed.
    pub fn paint(&mut self, pos: impl Into<Position>) -> bool {
        let glyph = self.active_glyph();
        self.put_glyph(pos.into(), glyph)
    }

    /// Clears a cell to void. Returns true if the cell changed.
    pub fn erase(&mut self, pos: impl Into<Position>) -> bool {
        self.put_glyph(pos.into(), VOID_GLYPH)
    }

    /// Flood fills with the active glyph, returning the number of changed cells.
    pub fn fill(&mut self, pos: impl Into<Position>) -> usize {
        let glyph = self.active_glyph();
        let changed = brushes::flood_fill(&mut self.document, pos, glyph);
        if changed > 0 {
            self.is_dirty = true;
        }
        changed
    }

    /// Writes the exit marker at `pos` and registers the exit.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfBounds`] if `pos` lies outside the map.
    pub fn place_exit(&mut self, pos: impl Into<Position>, target_map: impl Into<String>, target_x: i32, target_y: i32) -> EngineResult<()> {
        self.place_trigger(pos, Trigger::exit(target_map, target_x, target_y))
    }

    /// Writes the teleport marker at `pos` and registers the teleport.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfBounds`] if `pos` lies outside the map.
    pub fn place_teleport(&mut self, pos: impl Into<Position>, target_x: i32, target_y: i32) -> EngineResult<()> {
        self.place_trigger(pos, Trigger::teleport(target_x, target_y))
    }

    /// Writes the trigger's marker glyph at `pos` and registers the trigger.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfBounds`] if `pos` lies outside the map.
    pub fn place_trigger(&mut self, pos: impl Into<Position>, trigger: Trigger) -> EngineResult<()> {
        let pos = pos.into();
        if !self.document.is_inside(pos) {
            return Err(EngineError::OutOfBounds {
                pos,
                width: self.document.width(),
                height: self.document.height(),
            });
        }
        self.document.set_cell(pos, trigger.glyph());
        self.document.place_trigger(pos, trigger)?;
        self.is_dirty = true;
        Ok(())
    }

    /// Removes the trigger at `pos`; the marker glyph stays.
    pub fn clear_trigger(&mut self, pos: impl Into<Position>) -> Option<Trigger> {
        let removed = self.document.clear_trigger(pos);
        if removed.is_some() {
            self.is_dirty = true;
        }
        removed
    }

    /// # Errors
    ///
    /// Returns [`EngineError::InvalidDimensions`] outside the loadable map size.
    pub fn resize(&mut self, width: i32, height: i32) -> EngineResult<()> {
        if !limits::is_within_limits(width, height) {
            return Err(EngineError::InvalidDimensions {
                width,
                height,
                max: limits::MAX_MAP_WIDTH.min(limits::MAX_MAP_HEIGHT),
            });
        }
        self.document.resize(width, height);
        self.is_dirty = true;
        Ok(())
    }

    /// Applies the active tool at `pos`.
    pub fn apply_tool(&mut self, pos: impl Into<Position>) -> ToolEvent {
        let pos = pos.into();
        match self.tool {
            Tool::Pencil => {
                if self.paint(pos) {
                    ToolEvent::CellChanged(pos)
                } else {
                    ToolEvent::None
                }
            }
            Tool::Eraser => {
                if self.erase(pos) {
                    ToolEvent::CellChanged(pos)
                } else {
                    ToolEvent::None
                }
            }
            Tool::Fill => match self.fill(pos) {
                0 => ToolEvent::None,
                changed => ToolEvent::RegionChanged(changed),
            },
            Tool::Exit | Tool::Teleport => {
                if self.document.is_inside(pos) {
                    ToolEvent::RequestTrigger { tool: self.tool, pos }
                } else {
                    ToolEvent::None
                }
            }
        }
    }

    /// Status bar text, e.g. `Map: Untitled [54x16]`.
    pub fn status_line(&self) -> String {
        format!("Map: {} [{}]", self.document.name(), self.document.size())
    }

    fn put_glyph(&mut self, pos: Position, glyph: char) -> bool {
        if !self.document.is_inside(pos) {
            return false;
        }
        let had_trigger = self.document.trigger_at(pos).is_some();
        let old_glyph = self.document.get_cell(pos);
        self.document.set_cell(pos, glyph);
        let changed = self.document.get_cell(pos) != old_glyph || (had_trigger && self.document.trigger_at(pos).is_none());
        if changed {
            self.is_dirty = true;
        }
        changed
    }
}
