//! Fixed chip-player contract data.
//!
//! The converter targets a fixed 4-channel chip-style player. Exports are
//! assumed to use the "expert" scale in the key of C, which pins the pitch
//! set to the 37 chromatic values below.

use serde::{Deserialize, Serialize};

/// Number of channels the player consumes. Extra source channels are ignored.
pub const PLAYER_CHANNELS: usize = 4;

/// Ticks spanned by one pattern block.
pub const TICKS_PER_BLOCK: u32 = 32;

/// BeepBox pitch values in table order (expert scale, key C).
///
/// Index 0 is reserved; a lookup hit at index 0 never produces a tone.
pub const PITCHES: [u32; 37] = [
    36, 37, 38, 39, 40, 41, 42, 43, 44, //
    45, 46, 47, 48, 49, 50, 51, 52, 53, //
    54, 55, 56, 57, 58, 59, 60, 61, 62, //
    63, 64, 65, 66, 67, 68, 69, 70, 71, //
    72,
];

/// Display names matching [`PITCHES`] index for index.
pub const NOTE_NAMES: [&str; 37] = [
    "C0", "D+0", "D0", "E+0", "E0", "F0", "F#0", "G0", "A+0", //
    "A0", "B+0", "B0", "C1", "D+1", "D1", "E+1", "E1", "F1", //
    "F#1", "G1", "A+1", "A1", "B+1", "B1", "C2", "D+2", "D2", //
    "E+2", "E2", "F2", "F#2", "G2", "A+2", "A2", "B+2", "B2", //
    "C3",
];

/// Chip waves in runtime instrument order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wave {
    /// Triangle wave (instrument 0, the fallback).
    Triangle,
    /// Square wave.
    Square,
    /// Wide pulse wave.
    PulseWide,
    /// Narrow pulse wave.
    PulseNarrow,
    /// Sawtooth wave.
    Sawtooth,
}

impl Wave {
    /// Returns the wave's BeepBox name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Wave::Triangle => "triangle",
            Wave::Square => "square",
            Wave::PulseWide => "pulse wide",
            Wave::PulseNarrow => "pulse narrow",
            Wave::Sawtooth => "sawtooth",
        }
    }

    /// Returns the runtime instrument index.
    pub fn index(&self) -> u32 {
        match self {
            Wave::Triangle => 0,
            Wave::Square => 1,
            Wave::PulseWide => 2,
            Wave::PulseNarrow => 3,
            Wave::Sawtooth => 4,
        }
    }

    /// Looks up a wave by its BeepBox name.
    pub fn from_name(name: &str) -> Option<Wave> {
        match name {
            "triangle" => Some(Wave::Triangle),
            "square" => Some(Wave::Square),
            "pulse wide" => Some(Wave::PulseWide),
            "pulse narrow" => Some(Wave::PulseNarrow),
            "sawtooth" => Some(Wave::Sawtooth),
            _ => None,
        }
    }

    /// Returns all waves in runtime order.
    pub fn all() -> &'static [Wave] {
        &[
            Wave::Triangle,
            Wave::Square,
            Wave::PulseWide,
            Wave::PulseNarrow,
            Wave::Sawtooth,
        ]
    }
}

impl std::fmt::Display for Wave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
