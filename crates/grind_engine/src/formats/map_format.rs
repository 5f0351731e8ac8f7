//! The `.map` text format.
//!
//! ```text
//! meta:width=4
//! meta:height=2
//! meta:name=Test
//! exit:x=1,y=0,map=town,tx=5,ty=5
//! layer:terrain
//! #..#
//! #.T#
//! ```
//!
//! Everything before the `layer:terrain` marker is header; exactly `height`
//! rows of terrain follow it.

use indexmap::IndexMap;

use crate::{
    MapDocument, Position, Size, Trigger,
    document::{META_HEIGHT, META_NAME, META_WIDTH},
    limits::{DEFAULT_HEIGHT, DEFAULT_NAME, DEFAULT_WIDTH, MAX_MAP_HEIGHT, MAX_MAP_WIDTH},
};

use super::{FormatWarning, TriggerFieldError};

pub const FILE_EXTENSION: &str = "map";

const META_PREFIX: &str = "meta:";
const EXIT_PREFIX: &str = "exit:";
const TELEPORT_PREFIX: &str = "teleport:";
const COMMENT_PREFIX: char = '%';
pub const TERRAIN_LAYER_MARKER: &str = "layer:terrain";

/// A loaded document together with everything that was skipped on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    pub document: MapDocument,
    pub warnings: Vec<FormatWarning>,
}

/// Parses map text. Never fails; malformed content is skipped.
pub fn parse(text: &str) -> MapDocument {
    parse_with_report(text).document
}

/// Parses map text and reports every line that was dropped or defaulted.
pub fn parse_with_report(text: &str) -> ParseReport {
    let mut warnings = Vec::new();
    let mut meta: IndexMap<String, String> = IndexMap::new();
    let mut extra_header_lines = Vec::new();
    let mut pending_triggers: Vec<(usize, Position, Trigger)> = Vec::new();

    let mut lines = text.lines().enumerate();

    // Pass 1: header, up to and including the terrain marker
    for (idx, line) in lines.by_ref() {
        let line_number = idx + 1;
        if line == TERRAIN_LAYER_MARKER {
            break;
        }
        if let Some(rest) = line.strip_prefix(META_PREFIX) {
            match rest.split_once('=') {
                Some((key, value)) => {
                    meta.insert(key.trim().to_string(), value.trim().to_string());
                }
                None => warnings.push(FormatWarning::MalformedMeta {
                    line: line_number,
                    text: line.to_string(),
                }),
            }
        } else if let Some(rest) = line.strip_prefix(EXIT_PREFIX) {
            collect_trigger(line_number, "exit", rest, &mut pending_triggers, &mut warnings);
        } else if let Some(rest) = line.strip_prefix(TELEPORT_PREFIX) {
            collect_trigger(line_number, "teleport", rest, &mut pending_triggers, &mut warnings);
        } else if line.starts_with(COMMENT_PREFIX) || line.trim().is_empty() {
            continue;
        } else {
            extra_header_lines.push(line.to_string());
        }
    }

    let size = read_dimensions(&meta, &mut warnings);
    let name = meta.get(META_NAME).cloned().unwrap_or_else(|| DEFAULT_NAME.to_string());
    let mut document = MapDocument::new(size.width, size.height, name);
    document.replace_metadata(meta);
    for line in extra_header_lines {
        document.add_extra_header_line(line);
    }

    for (line, pos, trigger) in pending_triggers {
        if size.contains(pos) {
            document.insert_trigger_unchecked(pos, trigger);
        } else {
            warnings.push(FormatWarning::TriggerOutOfBounds {
                line,
                pos,
                width: size.width,
                height: size.height,
            });
        }
    }

    // Pass 2: terrain rows, truncated or padded to the map width
    for (y, (_, line)) in lines.take(size.height as usize).enumerate() {
        for (x, ch) in line.chars().take(size.width as usize).enumerate() {
            document.put_raw(Position::new(x as i32, y as i32), ch);
        }
    }

    for warning in &warnings {
        log::warn!("{warning}");
    }

    ParseReport { document, warnings }
}

/// Serializes a document. Output always ends with a single newline.
pub fn serialize(document: &MapDocument) -> String {
    let mut lines = Vec::with_capacity(document.height() as usize + document.trigger_count() + 8);

    for (key, value) in &document.synced_metadata() {
        lines.push(format!("{META_PREFIX}{key}={value}"));
    }
    lines.extend(document.extra_header_lines().iter().cloned());
    for (pos, trigger) in document.triggers() {
        lines.push(trigger_line(pos, trigger));
    }
    lines.push(TERRAIN_LAYER_MARKER.to_string());
    lines.extend(document.rows());

    let mut result = lines.join("\n");
    result.push('\n');
    result
}

fn trigger_line(pos: Position, trigger: &Trigger) -> String {
    let mut fields = vec![format!("x={}", pos.x), format!("y={}", pos.y)];
    if let Some(map) = trigger.target_map() {
        fields.push(format!("map={map}"));
    }
    let (tx, ty) = trigger.target();
    if let Some(tx) = tx {
        fields.push(format!("tx={tx}"));
    }
    if let Some(ty) = ty {
        fields.push(format!("ty={ty}"));
    }
    format!("{}:{}", trigger.keyword(), fields.join(","))
}

fn collect_trigger(
    line: usize,
    keyword: &'static str,
    fields: &str,
    pending: &mut Vec<(usize, Position, Trigger)>,
    warnings: &mut Vec<FormatWarning>,
) {
    match parse_trigger_fields(keyword, fields) {
        Ok((pos, trigger)) => pending.push((line, pos, trigger)),
        Err(reason) => warnings.push(FormatWarning::MalformedTrigger { line, keyword, reason }),
    }
}

fn parse_trigger_fields(keyword: &str, fields: &str) -> Result<(Position, Trigger), TriggerFieldError> {
    let mut x = None;
    let mut y = None;
    let mut map = None;
    let mut tx = None;
    let mut ty = None;

    for field in fields.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        let Some((key, value)) = field.split_once('=') else {
            return Err(TriggerFieldError::MissingEquals(field.to_string()));
        };
        let key = key.trim();
        let value = value.trim();
        match key {
            "x" => x = Some(parse_int(key, value)?),
            "y" => y = Some(parse_int(key, value)?),
            "tx" => tx = Some(parse_int(key, value)?),
            "ty" => ty = Some(parse_int(key, value)?),
            "map" => map = Some(value.to_string()),
            _ => log::debug!("ignoring unknown {keyword} field '{key}'"),
        }
    }

    let x = x.ok_or(TriggerFieldError::MissingField("x"))?;
    let y = y.ok_or(TriggerFieldError::MissingField("y"))?;
    let trigger = if keyword == "exit" {
        Trigger::Exit {
            target_map: map,
            target_x: tx,
            target_y: ty,
        }
    } else {
        Trigger::Teleport { target_x: tx, target_y: ty }
    };
    Ok((Position::new(x, y), trigger))
}

fn parse_int(field: &str, value: &str) -> Result<i32, TriggerFieldError> {
    value.parse::<i32>().map_err(|_| TriggerFieldError::NotAnInteger {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Reads `width`/`height` from the header. A missing entry uses its default;
/// a present but unusable one resets both dimensions to the defaults.
fn read_dimensions(meta: &IndexMap<String, String>, warnings: &mut Vec<FormatWarning>) -> Size {
    let width = read_dimension(meta, META_WIDTH, DEFAULT_WIDTH, MAX_MAP_WIDTH);
    let height = read_dimension(meta, META_HEIGHT, DEFAULT_HEIGHT, MAX_MAP_HEIGHT);
    match (width, height) {
        (Ok(width), Ok(height)) => Size::new(width, height),
        (width, height) => {
            warnings.extend(width.err());
            warnings.extend(height.err());
            Size::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
        }
    }
}

fn read_dimension(meta: &IndexMap<String, String>, key: &'static str, default: i32, max: i32) -> Result<i32, FormatWarning> {
    let Some(value) = meta.get(key) else {
        return Ok(default);
    };
    match value.parse::<i32>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(FormatWarning::InvalidDimension { key, value: value.clone() }),
    }
}
