use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing a map file.
#[derive(Debug, Error)]
pub enum MapError {
    /// File I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File that was being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
    /// JSON encode/decode error
    #[error("failed to parse map JSON {path}: {source}")]
    Json {
        /// File that was being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
    /// A grid key that is not of the form `"x;y"`
    #[error("invalid grid key '{key}', expected \"x;y\"")]
    InvalidKey {
        /// The offending key
        key: String,
    },
    /// A grid key that names a different cell than its tile's `pos`
    #[error("grid key '{key}' does not match tile position [{x}, {y}]")]
    KeyMismatch {
        /// The grid key
        key: String,
        /// Tile x
        x: i32,
        /// Tile y
        y: i32,
    },
    /// A grid cell whose pixel position does not fit in an `i32`
    #[error("grid key '{key}' is out of range for tile size {tile_size}")]
    CellOutOfRange {
        /// The grid key
        key: String,
        /// Tile size of the map
        tile_size: u32,
    },
    /// Tile size must be at least one pixel
    #[error("invalid tile size {0}")]
    InvalidTileSize(u32),
}

impl MapError {
    /// True when the map file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MapError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Errors raised when looking up game assets.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    /// No asset registered under this key
    #[error("no asset registered under '{0}'")]
    Missing(String),
    /// The key exists but holds a different kind of asset
    #[error("asset '{key}' is not {expected}")]
    WrongKind {
        /// The looked up key
        key: String,
        /// What the caller asked for
        expected: &'static str,
    },
    /// A tile variant outside the image list of its type
    #[error("asset '{key}' has no variant {variant}")]
    MissingVariant {
        /// The tile type
        key: String,
        /// Requested index
        variant: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_only_reported_for_missing_files() {
        let missing = MapError::Io {
            path: PathBuf::from("map.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(missing.is_not_found());

        let denied = MapError::Io {
            path: PathBuf::from("map.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        };
        assert!(!denied.is_not_found());
        assert!(!MapError::InvalidTileSize(0).is_not_found());
    }
}
