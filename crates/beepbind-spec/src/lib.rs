//! BeepBox song export model, validation, and hashing.
//!
//! This crate owns the input side of the converter: serde types for the
//! BeepBox (v2.3) JSON export, structural validation with coded
//! errors/warnings and JSON paths, the fixed chip-player contract data
//! (channel count, block length, pitch table, wave set), and BLAKE3 source
//! hashing for provenance reporting.

pub mod chip;
pub mod error;
pub mod hash;
pub mod song;
pub mod validation;

// Re-export main types
pub use chip::{Wave, NOTE_NAMES, PITCHES, PLAYER_CHANNELS, TICKS_PER_BLOCK};
pub use error::{
    ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use hash::source_hash;
pub use song::{Instrument, NotePoint, Song, SongChannel, SongNote, SongPattern};
pub use validation::validate_song;

/// Crate version for identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
