use indexmap::IndexMap;

use crate::{
    EngineError, Position, Result, Size, Trigger,
    limits::{DEFAULT_HEIGHT, DEFAULT_NAME, DEFAULT_WIDTH},
    trigger::is_trigger_glyph,
};

/// The glyph for an empty cell.
pub const VOID_GLYPH: char = ' ';

pub const META_WIDTH: &str = "width";
pub const META_HEIGHT: &str = "height";
pub const META_NAME: &str = "name";

/// Metadata keys that always mirror live document fields.
pub const RESERVED_META_KEYS: [&str; 3] = [META_WIDTH, META_HEIGHT, META_NAME];

/// A single-layer character map with trigger annotations.
///
/// Invariants kept by every mutation:
/// - every trigger lies inside `[0, width) x [0, height)`
/// - a cell that receives a non trigger glyph loses its trigger
/// - `metadata` contains `width`, `height` and `name` matching the live fields
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapDocument {
    size: Size,
    name: String,
    metadata: IndexMap<String, String>,
    extra_header_lines: Vec<String>,
    rows: Vec<Vec<char>>,
    triggers: IndexMap<Position, Trigger>,
}

impl Default for MapDocument {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_NAME)
    }
}

impl MapDocument {
    /// Creates a blank map. Non-positive dimensions are raised to 1.
    pub fn new(width: i32, height: i32, name: impl Into<String>) -> Self {
        let size = Size::new(width.max(1), height.max(1));
        let name: String = name.into();
        let mut result = Self {
            size,
            name: name.replace(is_line_break, " "),
            metadata: IndexMap::new(),
            extra_header_lines: Vec::new(),
            rows: blank_rows(size),
            triggers: IndexMap::new(),
        };
        result.sync_metadata();
        result
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Line breaks in `name` become spaces so the header stays one line.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name: String = name.into();
        self.name = name.replace(is_line_break, " ");
        self.metadata.insert(META_NAME.to_string(), self.name.clone());
    }

    pub fn is_inside(&self, pos: impl Into<Position>) -> bool {
        self.size.contains(pos.into())
    }

    /// Resizes the map, keeping the overlapping top left rectangle.
    ///
    /// Triggers outside the new bounds are dropped and stay dropped even if the
    /// map later grows back over their old position.
    pub fn resize(&mut self, width: i32, height: i32) {
        let new_size = Size::new(width.max(1), height.max(1));
        let mut new_rows = blank_rows(new_size);
        let copy_w = self.size.width.min(new_size.width) as usize;
        for (new_row, old_row) in new_rows.iter_mut().zip(self.rows.iter()) {
            new_row[..copy_w].copy_from_slice(&old_row[..copy_w]);
        }
        self.rows = new_rows;
        self.size = new_size;

        let before = self.triggers.len();
        self.triggers.retain(|pos, _| new_size.contains(*pos));
        if self.triggers.len() < before {
            log::debug!("resize to {new_size} dropped {} trigger(s)", before - self.triggers.len());
        }
        self.sync_metadata();
    }

    /// Returns the glyph at `pos`, or void for positions outside the map.
    pub fn get_cell(&self, pos: impl Into<Position>) -> char {
        let pos = pos.into();
        if !self.is_inside(pos) {
            return VOID_GLYPH;
        }
        self.rows[pos.y as usize][pos.x as usize]
    }

    /// Writes a glyph. Positions outside the map are ignored.
    ///
    /// Any glyph other than a trigger marker removes the trigger at `pos`.
    /// Line breaks can't be stored in a row and are written as void.
    pub fn set_cell(&mut self, pos: impl Into<Position>, ch: char) {
        let pos = pos.into();
        if !self.is_inside(pos) {
            return;
        }
        let ch = if is_line_break(ch) { VOID_GLYPH } else { ch };
        self.rows[pos.y as usize][pos.x as usize] = ch;
        if !is_trigger_glyph(ch) {
            self.triggers.shift_remove(&pos);
        }
    }

    /// Writes a glyph without touching triggers; used while loading.
    pub(crate) fn put_raw(&mut self, pos: Position, ch: char) {
        if self.is_inside(pos) {
            self.rows[pos.y as usize][pos.x as usize] = ch;
        }
    }

    /// Registers a trigger, replacing and returning any previous one at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OutOfBounds`] if `pos` lies outside the map.
    pub fn place_trigger(&mut self, pos: impl Into<Position>, trigger: Trigger) -> Result<Option<Trigger>> {
        let pos = pos.into();
        if !self.is_inside(pos) {
            return Err(EngineError::OutOfBounds {
                pos,
                width: self.size.width,
                height: self.size.height,
            });
        }
        Ok(self.triggers.insert(pos, trigger))
    }

    /// Removes the trigger at `pos`, returning it if there was one.
    pub fn clear_trigger(&mut self, pos: impl Into<Position>) -> Option<Trigger> {
        self.triggers.shift_remove(&pos.into())
    }

    pub fn trigger_at(&self, pos: impl Into<Position>) -> Option<&Trigger> {
        self.triggers.get(&pos.into())
    }

    /// Triggers in registration order.
    pub fn triggers(&self) -> impl Iterator<Item = (Position, &Trigger)> {
        self.triggers.iter().map(|(pos, trigger)| (*pos, trigger))
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Metadata entries in insertion order.
    pub fn metadata(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metadata.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Sets a free-form metadata entry.
    ///
    /// # Errors
    ///
    /// `width`, `height` and `name` are derived from the document and are rejected.
    /// So are line breaks anywhere and `=` in the key, which wouldn't load back.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        if RESERVED_META_KEYS.contains(&key.as_str()) {
            return Err(EngineError::ReservedMetadataKey { key });
        }
        let value = value.into();
        if key.contains(is_line_break) || key.contains('=') || value.contains(is_line_break) {
            return Err(EngineError::InvalidMetadata { key });
        }
        self.metadata.insert(key, value);
        Ok(())
    }

    /// Removes a free-form metadata entry, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// `width`, `height` and `name` can't be removed.
    pub fn remove_metadata(&mut self, key: &str) -> Result<Option<String>> {
        if RESERVED_META_KEYS.contains(&key) {
            return Err(EngineError::ReservedMetadataKey { key: key.to_string() });
        }
        Ok(self.metadata.shift_remove(key))
    }

    /// Header lines the loader didn't recognise, kept verbatim.
    pub fn extra_header_lines(&self) -> &[String] {
        &self.extra_header_lines
    }

    pub fn add_extra_header_line(&mut self, line: impl Into<String>) {
        self.extra_header_lines.push(line.into());
    }

    /// Returns row `y` as a string of exactly `width` characters.
    pub fn row(&self, y: i32) -> Option<String> {
        if y < 0 {
            return None;
        }
        self.rows.get(y as usize).map(|row| row.iter().collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|row| row.iter().collect())
    }

    /// Replaces the loaded metadata wholesale, then re-derives the reserved keys.
    pub(crate) fn replace_metadata(&mut self, metadata: IndexMap<String, String>) {
        self.metadata = metadata;
        self.sync_metadata();
    }

    pub(crate) fn insert_trigger_unchecked(&mut self, pos: Position, trigger: Trigger) {
        self.triggers.insert(pos, trigger);
    }

    /// Metadata with the reserved keys refreshed from the live fields.
    ///
    /// Existing reserved keys keep their position, missing ones are appended.
    pub fn synced_metadata(&self) -> IndexMap<String, String> {
        let mut metadata = self.metadata.clone();
        metadata.insert(META_WIDTH.to_string(), self.size.width.to_string());
        metadata.insert(META_HEIGHT.to_string(), self.size.height.to_string());
        metadata.insert(META_NAME.to_string(), self.name.clone());
        metadata
    }

    fn sync_metadata(&mut self) {
        self.metadata = self.synced_metadata();
    }
}

fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r')
}

fn blank_rows(size: Size) -> Vec<Vec<char>> {
    vec![vec![VOID_GLYPH; size.width as usize]; size.height as usize]
}
