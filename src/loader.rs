//! Save file loading
//!
//! A save is a JSON object whose `"Map"` key holds an array of tiles:
//!
//! ```json
//! {"Map": [{"X": 0, "Y": 0, "DescriptorID": "stone"}, ...]}
//! ```
//!
//! Every tile is validated before anything is rendered. A tile with a missing
//! or mistyped column fails the whole load instead of being skipped, since a
//! silently dropped tile would show up as a hole in the map.

use crate::error::{MapError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

const MAP_KEY: &str = "Map";
const REQUIRED_COLUMNS: [&str; 3] = ["X", "Y", "DescriptorID"];

/// One map tile as stored in the save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    #[serde(rename = "X")]
    pub x: i64,
    #[serde(rename = "Y")]
    pub y: i64,
    #[serde(rename = "DescriptorID")]
    pub descriptor_id: String,
}

impl Tile {
    pub fn new(x: i64, y: i64, descriptor_id: impl Into<String>) -> Self {
        Self { x, y, descriptor_id: descriptor_id.into() }
    }
}

/// Read and validate the tiles of a save file.
pub fn load_map<P: AsRef<Path>>(path: P) -> Result<Vec<Tile>> {
    let path = path.as_ref();
    log::info!("Loading map from: {}", path.display());
    let text = std::fs::read_to_string(path).map_err(|e| MapError::from_read(path, e))?;
    parse_map(&text, path)
}

/// Validate save JSON already in memory. `path` is only used in error messages.
pub fn parse_map(text: &str, path: &Path) -> Result<Vec<Tile>> {
    let data: Value = serde_json::from_str(text).map_err(|e| MapError::InvalidJson {
        path: path.to_path_buf(),
        source: e,
    })?;

    let entries = match data.get(MAP_KEY) {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(MapError::MissingMapKey { path: path.to_path_buf(), found: json_type(other) })
        }
        None if data.is_object() => {
            return Err(MapError::MissingMapKey { path: path.to_path_buf(), found: "nothing" })
        }
        None => {
            return Err(MapError::MissingMapKey { path: path.to_path_buf(), found: json_type(&data) })
        }
    };

    if entries.is_empty() {
        return Err(MapError::EmptyMapData { path: path.to_path_buf() });
    }

    let tiles = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_tile(entry, index, path))
        .collect::<Result<Vec<_>>>()?;

    let duplicates = count_duplicate_coordinates(&tiles);
    if duplicates > 0 {
        log::warn!(
            "{} tile(s) share coordinates with an earlier tile in {}; the last one wins",
            duplicates,
            path.display()
        );
    }
    log::debug!("Parsed {} tiles from {}", tiles.len(), path.display());

    Ok(tiles)
}

fn parse_tile(entry: &Value, index: usize, path: &Path) -> Result<Tile> {
    let Some(fields) = entry.as_object() else {
        return Err(MapError::MissingRequiredColumn {
            path: path.to_path_buf(),
            index,
            column: REQUIRED_COLUMNS[0],
        });
    };

    if let Some(column) = REQUIRED_COLUMNS.iter().find(|c| !fields.contains_key(**c)) {
        return Err(MapError::MissingRequiredColumn { path: path.to_path_buf(), index, column: *column });
    }

    Tile::deserialize(entry).map_err(|e| MapError::InvalidTile {
        path: path.to_path_buf(),
        index,
        reason: e.to_string(),
    })
}

fn count_duplicate_coordinates(tiles: &[Tile]) -> usize {
    let mut seen = HashSet::with_capacity(tiles.len());
    tiles.iter().filter(|t| !seen.insert((t.x, t.y))).count()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
