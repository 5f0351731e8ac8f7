/// Glyph that marks an exit cell on the terrain layer.
pub const EXIT_GLYPH: char = 'E';

/// Glyph that marks a teleport cell on the terrain layer.
pub const TELEPORT_GLYPH: char = 'T';

/// Returns true for the two glyphs that may carry a trigger.
pub fn is_trigger_glyph(ch: char) -> bool {
    ch == EXIT_GLYPH || ch == TELEPORT_GLYPH
}

/// Navigation data bound to a single grid cell.
///
/// All target fields are optional; unset fields are omitted when the map is saved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Leaves the current map, optionally for a position on another map.
    Exit {
        target_map: Option<String>,
        target_x: Option<i32>,
        target_y: Option<i32>,
    },
    /// Moves within the current map.
    Teleport { target_x: Option<i32>, target_y: Option<i32> },
}

impl Trigger {
    pub fn exit(target_map: impl Into<String>, target_x: i32, target_y: i32) -> Self {
        Trigger::Exit {
            target_map: Some(target_map.into()),
            target_x: Some(target_x),
            target_y: Some(target_y),
        }
    }

    pub fn teleport(target_x: i32, target_y: i32) -> Self {
        Trigger::Teleport {
            target_x: Some(target_x),
            target_y: Some(target_y),
        }
    }

    /// Header keyword used by the `.map` format (`exit` / `teleport`).
    pub fn keyword(&self) -> &'static str {
        match self {
            Trigger::Exit { .. } => "exit",
            Trigger::Teleport { .. } => "teleport",
        }
    }

    /// The marker glyph that goes with this kind of trigger.
    pub fn glyph(&self) -> char {
        match self {
            Trigger::Exit { .. } => EXIT_GLYPH,
            Trigger::Teleport { .. } => TELEPORT_GLYPH,
        }
    }

    pub fn target_map(&self) -> Option<&str> {
        match self {
            Trigger::Exit { target_map, .. } => target_map.as_deref(),
            Trigger::Teleport { .. } => None,
        }
    }

    pub fn target(&self) -> (Option<i32>, Option<i32>) {
        match self {
            Trigger::Exit { target_x, target_y, .. } | Trigger::Teleport { target_x, target_y } => (*target_x, *target_y),
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())?;
        if let Some(map) = self.target_map() {
            write!(f, " to '{map}'")?;
        }
        match self.target() {
            (Some(x), Some(y)) => write!(f, " at ({x}, {y})"),
            (Some(x), None) => write!(f, " at x {x}"),
            (None, Some(y)) => write!(f, " at y {y}"),
            (None, None) => Ok(()),
        }
    }
}
