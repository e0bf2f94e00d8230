//! Error type shared by the loader, the override config and the composer

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Everything that can stop a render. All variants are fatal for the run.
#[derive(Debug)]
pub enum MapError {
    FileNotFound { path: PathBuf },
    Io { path: PathBuf, source: io::Error },
    InvalidJson { path: PathBuf, source: serde_json::Error },
    /// `"Map"` is absent or not an array. `found` names what was there instead.
    MissingMapKey { path: PathBuf, found: &'static str },
    MissingRequiredColumn { path: PathBuf, index: usize, column: &'static str },
    InvalidTile { path: PathBuf, index: usize, reason: String },
    EmptyMapData { path: PathBuf },
    /// The bounding box holds more cells than a page can reasonably show.
    GridTooLarge { path: PathBuf, width: u64, height: u64 },
    ConfigNotFound { path: PathBuf },
    InvalidConfig { path: PathBuf, reason: String },
    Write { path: PathBuf, source: io::Error },
    /// The output path points at the save being rendered.
    OutputIsSave { path: PathBuf },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::FileNotFound { path } => write!(f, "File not found: {}", path.display()),
            MapError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            MapError::InvalidJson { path, source } => {
                write!(f, "Error decoding JSON from file: {}. {}", path.display(), source)
            }
            MapError::MissingMapKey { path, found } => write!(
                f,
                "Expected 'Map' data to be a list, but got {} in: {}",
                found,
                path.display()
            ),
            MapError::MissingRequiredColumn { path, index, column } => write!(
                f,
                "Tile #{} is missing required column '{}' (expected 'X', 'Y', 'DescriptorID') in: {}",
                index,
                column,
                path.display()
            ),
            MapError::InvalidTile { path, index, reason } => {
                write!(f, "Tile #{} is invalid ({}) in: {}", index, reason, path.display())
            }
            MapError::EmptyMapData { path } => {
                write!(f, "No map data found in: {}", path.display())
            }
            MapError::GridTooLarge { path, width, height } => write!(
                f,
                "Map in {} spans {}x{} cells, which is too large to render",
                path.display(),
                width,
                height
            ),
            MapError::ConfigNotFound { path } => {
                write!(f, "Override config not found: {}", path.display())
            }
            MapError::InvalidConfig { path, reason } => {
                write!(f, "Invalid override config {}: {}", path.display(), reason)
            }
            MapError::Write { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
            MapError::OutputIsSave { path } => {
                write!(f, "Refusing to overwrite the save file itself: {}", path.display())
            }
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Io { source, .. } | MapError::Write { source, .. } => Some(source),
            MapError::InvalidJson { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl MapError {
    /// Classify a read failure, keeping "not found" distinct from other IO errors.
    pub fn from_read(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        if err.kind() == io::ErrorKind::NotFound {
            MapError::FileNotFound { path }
        } else {
            MapError::Io { path, source: err }
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_classified() {
        let err = MapError::from_read("save.json", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, MapError::FileNotFound { .. }));
        assert_eq!(err.to_string(), "File not found: save.json");
    }

    #[test]
    fn test_other_read_errors_keep_source() {
        let err = MapError::from_read("save.json", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, MapError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_messages_name_the_file() {
        let err = MapError::MissingRequiredColumn {
            path: PathBuf::from("/saves/slot1.json"),
            index: 3,
            column: "DescriptorID",
        };
        let msg = err.to_string();
        assert!(msg.contains("DescriptorID"));
        assert!(msg.contains("/saves/slot1.json"));
        assert!(msg.contains("#3"));
    }
}
