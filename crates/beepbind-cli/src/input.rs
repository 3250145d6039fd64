//! Input loading for song exports.
//!
//! Loads a BeepBox JSON export from disk and returns the parsed song plus
//! the source file's hash for provenance reporting.

use std::path::{Path, PathBuf};

use beepbind_spec::{hash::source_hash, Song};

/// Result of loading a song export.
#[derive(Debug)]
pub struct LoadResult {
    /// The parsed song.
    pub song: Song,
    /// BLAKE3 hash of the source file content (hex string).
    pub source_hash: String,
}

/// Errors that can occur during song loading.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parsing failed.
    JsonParse { path: PathBuf, message: String },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            InputError::JsonParse { path, message } => {
                write!(f, "failed to parse {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            InputError::JsonParse { .. } => None,
        }
    }
}

/// Loads a song export from a JSON file.
pub fn load_song(path: &Path) -> Result<LoadResult, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let song = Song::from_json(&content).map_err(|err| InputError::JsonParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    Ok(LoadResult {
        song,
        source_hash: source_hash(content.as_bytes()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_song() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"ticksPerBeat": 8, "channels": [{{"instruments": [{{"wave": "square"}}], "patterns": []}}]}}"#
        )
        .unwrap();

        let result = load_song(file.path()).unwrap();
        assert_eq!(result.song.ticks_per_beat, 8);
        assert_eq!(result.source_hash.len(), 64);
    }

    #[test]
    fn test_missing_file() {
        let err = load_song(Path::new("/nonexistent/song.json")).unwrap_err();
        assert!(matches!(err, InputError::FileRead { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = load_song(file.path()).unwrap_err();
        assert!(matches!(err, InputError::JsonParse { .. }));
    }
}
