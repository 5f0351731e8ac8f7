use grind_engine::{EXIT_GLYPH, TELEPORT_GLYPH, VOID_GLYPH};

/// A glyph offered in the palette together with its tile name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    pub glyph: char,
    pub label: &'static str,
}

impl PaletteEntry {
    pub const fn new(glyph: char, label: &'static str) -> Self {
        Self { glyph, label }
    }
}

/// Common terrain glyphs, void last.
pub const COMMON_GLYPHS: [PaletteEntry; 6] = [
    PaletteEntry::new('#', "Wall"),
    PaletteEntry::new('.', "Floor"),
    PaletteEntry::new('~', "Water"),
    PaletteEntry::new('+', "Door"),
    PaletteEntry::new('>', "Stairs"),
    PaletteEntry::new(VOID_GLYPH, "Void"),
];

/// Label shown for `glyph`, if it has one.
pub fn glyph_label(glyph: char) -> Option<&'static str> {
    if let Some(entry) = COMMON_GLYPHS.iter().find(|entry| entry.glyph == glyph) {
        return Some(entry.label);
    }
    match glyph {
        EXIT_GLYPH => Some("Exit"),
        TELEPORT_GLYPH => Some("Teleport"),
        _ => None,
    }
}
