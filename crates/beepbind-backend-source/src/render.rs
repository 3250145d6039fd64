//! Source text rendering.
//!
//! Turns a [`ResolvedTrack`] into Rust source: an optional driver preamble,
//! a banner comment, and a `Track` struct literal with fixed field order and
//! indentation. Rendering is pure and deterministic; the same track renders
//! to byte-identical text every time.

use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use beepbind_spec::chip::TICKS_PER_BLOCK;

use crate::track::{ResolvedChannel, ResolvedNote, ResolvedTrack};

/// The static chip-player driver, concatenated verbatim when requested.
pub const DRIVER_TEMPLATE: &str = include_str!("../templates/driver.rs");

/// Sentinel emitted for notes without a mapped tone (slots mode only).
const NO_TONE: u8 = 0xFF;

/// Pattern for a valid generated binding name.
const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

static IDENTIFIER_REGEX: OnceLock<Regex> = OnceLock::new();

fn identifier_regex() -> &'static Regex {
    IDENTIFIER_REGEX.get_or_init(|| Regex::new(IDENTIFIER_PATTERN).expect("invalid regex pattern"))
}

/// How note entries are laid out in the generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderMode {
    /// Every resolved note in discovery order, as `[start, pitch, sustain]`.
    #[default]
    List,
    /// Legacy fixed-table shape: notes land in a 32-slot table keyed by
    /// `start % 32`, later notes overwrite earlier ones at the same slot,
    /// and only occupied slots emit, as `[tone, sustain, 0x00]` with `0xff`
    /// standing in for a note without a mapped tone. Position encodes the
    /// start tick, so gaps are left to the surrounding driver logic.
    Slots,
}

impl RenderMode {
    /// Returns the mode name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::List => "list",
            RenderMode::Slots => "slots",
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(RenderMode::List),
            "slots" => Ok(RenderMode::Slots),
            _ => Err(format!("unknown render mode: {} (expected list or slots)", s)),
        }
    }
}

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The binding name is not a valid identifier.
    #[error("'{name}' is not a valid identifier for the generated binding")]
    InvalidIdentifier { name: String },
}

/// Render a resolved track as Rust source text.
///
/// # Arguments
/// * `track` - The resolved track
/// * `name` - Identifier for the generated static binding, used verbatim
/// * `mode` - Note table layout
/// * `include_driver` - Whether to prefix the embedded driver template
pub fn render(
    track: &ResolvedTrack,
    name: &str,
    mode: RenderMode,
    include_driver: bool,
) -> Result<String, RenderError> {
    if !identifier_regex().is_match(name) {
        return Err(RenderError::InvalidIdentifier {
            name: name.to_string(),
        });
    }

    let mut out = String::new();
    if include_driver {
        out.push_str(DRIVER_TEMPLATE);
        out.push('\n');
    }

    let _ = writeln!(out, "// Soundtrack: {}", name);
    let _ = writeln!(out, "pub static {}: Track = Track {{", name);
    let _ = writeln!(out, "    ticks: {},", track.ticks);
    if let Some(sequences) = track.sequences {
        let _ = writeln!(out, "    sequences: {},", sequences);
    }
    out.push_str("    channels: [\n");
    for channel in &track.channels {
        render_channel(&mut out, channel, mode);
    }
    out.push_str("    ],\n");
    out.push_str("};\n");

    Ok(out)
}

/// Render one channel block.
fn render_channel(out: &mut String, channel: &ResolvedChannel, mode: RenderMode) {
    out.push_str("        Channel {\n");
    let _ = writeln!(out, "            instrument: {},", channel.wave.index());
    if let Some(volume) = channel.volume {
        let _ = writeln!(out, "            volume: {},", volume);
    }

    let entries = match mode {
        RenderMode::List => channel.notes.iter().map(list_entry).collect::<Vec<_>>(),
        RenderMode::Slots => slot_entries(&channel.notes),
    };

    if entries.is_empty() {
        out.push_str("            notes: &[],\n");
    } else {
        out.push_str("            notes: &[\n");
        for entry in entries {
            let _ = writeln!(out, "                {},", entry);
        }
        out.push_str("            ],\n");
    }
    out.push_str("        },\n");
}

/// Format one canonical note entry.
fn list_entry(note: &ResolvedNote) -> String {
    format!(
        "[{}, {}, {}]",
        hex(note.start),
        hex(note.pitch as u32),
        hex(note.sustain)
    )
}

/// Fold notes into the legacy 32-slot table and format the occupied slots.
fn slot_entries(notes: &[ResolvedNote]) -> Vec<String> {
    let mut slots: [Option<&ResolvedNote>; TICKS_PER_BLOCK as usize] =
        [None; TICKS_PER_BLOCK as usize];
    for note in notes {
        // Overwrite-on-collision is the table's historical behavior.
        slots[(note.start % TICKS_PER_BLOCK) as usize] = Some(note);
    }

    slots
        .iter()
        .flatten()
        .map(|note| {
            format!(
                "[{}, {}, 0x00]",
                hex(note.tone.unwrap_or(NO_TONE) as u32),
                hex(note.sustain)
            )
        })
        .collect()
}

/// Format a value as a minimum-2-digit lowercase hex literal.
fn hex(value: u32) -> String {
    format!("0x{:02x}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use beepbind_spec::Song;
    use pretty_assertions::assert_eq;

    fn round_trip_track() -> ResolvedTrack {
        let song = Song::from_json(
            r#"{
                "ticksPerBeat": 8,
                "channels": [{
                    "instruments": [{"wave": "square"}],
                    "patterns": [
                        {"notes": [{"pitches": [48], "points": [{"tick": 0}, {"tick": 4}]}]}
                    ],
                    "sequence": [1]
                }]
            }"#,
        )
        .unwrap();
        resolve(&song).unwrap()
    }

    #[test]
    fn test_render_list_mode() {
        let track = round_trip_track();
        let text = render(&track, "INTRO", RenderMode::List, false).unwrap();
        assert_eq!(
            text,
            "\
// Soundtrack: INTRO
pub static INTRO: Track = Track {
    ticks: 8,
    sequences: 1,
    channels: [
        Channel {
            instrument: 1,
            notes: &[
                [0x00, 0x30, 0x0f],
            ],
        },
        Channel {
            instrument: 0,
            notes: &[],
        },
        Channel {
            instrument: 0,
            notes: &[],
        },
        Channel {
            instrument: 0,
            notes: &[],
        },
    ],
};
"
        );
    }

    #[test]
    fn test_render_slots_mode() {
        let track = round_trip_track();
        let text = render(&track, "INTRO", RenderMode::Slots, false).unwrap();
        // Pitch 48 sits at table index 12.
        assert!(text.contains("[0x0c, 0x0f, 0x00],"));
        // One occupied slot, three empty channels.
        assert_eq!(text.matches("0x00],").count(), 1);
        assert_eq!(text.matches("notes: &[],").count(), 3);
    }

    #[test]
    fn test_render_is_idempotent() {
        let track = round_trip_track();
        let a = render(&track, "INTRO", RenderMode::List, false).unwrap();
        let b = render(&track, "INTRO", RenderMode::List, false).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_driver_preamble_is_verbatim_prefix() {
        let track = round_trip_track();
        let text = render(&track, "INTRO", RenderMode::List, true).unwrap();
        assert!(text.starts_with(DRIVER_TEMPLATE));
        assert!(text.contains("// Soundtrack: INTRO"));
    }

    #[test]
    fn test_volume_is_emitted_only_when_present() {
        let mut track = round_trip_track();
        assert!(!render(&track, "A", RenderMode::List, false)
            .unwrap()
            .contains("volume"));

        track.channels[0].volume = Some(80);
        let text = render(&track, "A", RenderMode::List, false).unwrap();
        assert!(text.contains("            volume: 80,\n"));
    }

    #[test]
    fn test_sequences_is_omitted_for_pattern_list_songs() {
        let mut track = round_trip_track();
        track.sequences = None;
        let text = render(&track, "A", RenderMode::List, false).unwrap();
        assert!(!text.contains("sequences"));
    }

    #[test]
    fn test_hex_is_min_two_digits_and_widens() {
        assert_eq!(hex(0), "0x00");
        assert_eq!(hex(15), "0x0f");
        assert_eq!(hex(255), "0xff");
        assert_eq!(hex(256), "0x100");
    }

    #[test]
    fn test_slot_collision_keeps_the_later_note() {
        let song = Song::from_json(
            r#"{
                "ticksPerBeat": 8,
                "channels": [{
                    "instruments": [{"wave": "square"}],
                    "patterns": [{"notes": [
                        {"pitches": [48], "points": [{"tick": 2}, {"tick": 4}]},
                        {"pitches": [50], "points": [{"tick": 2}, {"tick": 8}]}
                    ]}]
                }]
            }"#,
        )
        .unwrap();
        let track = resolve(&song).unwrap();

        // The list keeps both notes; the slot table keeps only the later one.
        let list = render(&track, "A", RenderMode::List, false).unwrap();
        assert!(list.contains("[0x02, 0x30, 0x05],"));
        assert!(list.contains("[0x02, 0x32, 0x19],"));

        let slots = render(&track, "A", RenderMode::Slots, false).unwrap();
        assert!(slots.contains("[0x0e, 0x19, 0x00],"));
        assert!(!slots.contains("0x0c"));
    }

    #[test]
    fn test_unmapped_tone_renders_as_sentinel_in_slots_mode() {
        let song = Song::from_json(
            r#"{
                "ticksPerBeat": 8,
                "channels": [{
                    "instruments": [{"wave": "square"}],
                    "patterns": [{"notes": [
                        {"pitches": [97], "points": [{"tick": 0}, {"tick": 4}]}
                    ]}]
                }]
            }"#,
        )
        .unwrap();
        let track = resolve(&song).unwrap();
        let text = render(&track, "A", RenderMode::Slots, false).unwrap();
        assert!(text.contains("[0xff, 0x0f, 0x00],"));
    }

    #[test]
    fn test_invalid_identifier_is_rejected() {
        let track = round_trip_track();
        for name in ["", "8BIT", "my song", "a-b"] {
            assert!(render(&track, name, RenderMode::List, false).is_err());
        }
        assert!(render(&track, "_song_2", RenderMode::List, false).is_ok());
    }

    #[test]
    fn test_render_mode_parsing() {
        assert_eq!("list".parse::<RenderMode>().unwrap(), RenderMode::List);
        assert_eq!("slots".parse::<RenderMode>().unwrap(), RenderMode::Slots);
        assert!("table".parse::<RenderMode>().is_err());
    }
}
