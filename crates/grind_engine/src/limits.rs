//! Map size limits
//!
//! Parsed files and newly created maps are bounded separately: new maps follow
//! the editor's "New Map" dialog bounds, parsed maps get a looser cap so that a
//! malformed header can't request an absurd allocation.

/// Width used when a file doesn't declare a usable width.
pub const DEFAULT_WIDTH: i32 = 54;

/// Height used when a file doesn't declare a usable height.
pub const DEFAULT_HEIGHT: i32 = 16;

/// Name given to maps without a `meta:name` entry.
pub const DEFAULT_NAME: &str = "Untitled";

/// Largest width or height accepted for a new map.
pub const MAX_NEW_MAP_SIZE: i32 = 500;

/// Maximum width in cells accepted when parsing.
pub const MAX_MAP_WIDTH: i32 = 1000;

/// Maximum height in cells accepted when parsing.
pub const MAX_MAP_HEIGHT: i32 = 1000;

/// Check if parsed dimensions are within safe limits
#[inline]
pub fn is_within_limits(width: i32, height: i32) -> bool {
    width > 0 && width <= MAX_MAP_WIDTH && height > 0 && height <= MAX_MAP_HEIGHT
}

/// Check if dimensions are valid for a freshly created map
#[inline]
pub fn is_valid_new_map_size(width: i32, height: i32) -> bool {
    (1..=MAX_NEW_MAP_SIZE).contains(&width) && (1..=MAX_NEW_MAP_SIZE).contains(&height)
}
