//! Bulk edit algorithms for map documents
//!
//! - Flood fill (4-connected BFS)

use std::collections::{HashSet, VecDeque};

use grind_engine::{MapDocument, Position, Size};

// ═══════════════════════════════════════════════════════════════════════════
// Flood Fill Algorithm
// ═══════════════════════════════════════════════════════════════════════════

/// Compute flood fill points using 4-connected BFS
///
/// Returns the connected region of cells sharing the glyph at `start`, without
/// modifying any state. The caller is responsible for actually setting the cells.
///
/// # Arguments
/// * `start` - Starting point coordinates
/// * `size` - Bounds of the grid
/// * `get_glyph` - Function to get the current glyph at a position
///
/// # Returns
/// A set of positions that should be filled, empty if `start` is out of bounds
pub fn flood_fill_points<F>(start: Position, size: Size, get_glyph: F) -> HashSet<Position>
where
    F: Fn(Position) -> char,
{
    let mut result = HashSet::new();

    if !size.contains(start) {
        return result;
    }

    // Target glyph is captured once, before anything changes
    let target = get_glyph(start);

    let mut queue = VecDeque::new();
    queue.push_back(start);
    result.insert(start);

    while let Some(pos) = queue.pop_front() {
        for next in pos.neighbours() {
            if !size.contains(next) || result.contains(&next) {
                continue;
            }
            if get_glyph(next) == target {
                result.insert(next);
                queue.push_back(next);
            }
        }
    }

    result
}

/// Flood fill the region around `start` with `glyph`.
///
/// Cells are written through [`MapDocument::set_cell`], so triggers on
/// overwritten cells are removed exactly as with manual edits.
///
/// Returns the number of cells changed. Nothing happens if `start` is outside
/// the map or already holds `glyph`.
pub fn flood_fill(document: &mut MapDocument, start: impl Into<Position>, glyph: char) -> usize {
    let start = start.into();
    if !document.is_inside(start) || document.get_cell(start) == glyph {
        return 0;
    }

    let points = flood_fill_points(start, document.size(), |pos| document.get_cell(pos));
    for pos in &points {
        document.set_cell(*pos, glyph);
    }
    log::debug!("flood fill at {start} changed {} cell(s) to '{glyph}'", points.len());
    points.len()
}
