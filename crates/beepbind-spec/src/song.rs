//! BeepBox song export types.

use serde::{Deserialize, Serialize};

/// A BeepBox song export.
///
/// This models the subset of the v2.3 JSON export the converter consumes.
/// Exports carry many more settings (scale, key, reverb, chorus, ...);
/// unknown fields are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    /// Ticks per beat.
    pub ticks_per_beat: u32,

    /// Channels in playback order. The channel index is significant.
    pub channels: Vec<SongChannel>,
}

/// One channel of a song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongChannel {
    /// Instrument definitions; only the first one is consumed.
    #[serde(default)]
    pub instruments: Vec<Instrument>,

    /// Reusable note patterns, referenced by the sequence (1-based).
    #[serde(default)]
    pub patterns: Vec<SongPattern>,

    /// Playback order: 1-based pattern indices, 0 meaning silence.
    ///
    /// When absent, patterns are played directly in list order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Vec<u32>>,
}

/// An instrument definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Wave name (e.g. "square", "pulse wide").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave: Option<String>,

    /// Channel volume, when the export carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u32>,
}

/// A pattern: a reusable list of notes within one 32-tick block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SongPattern {
    /// Notes in the pattern.
    #[serde(default)]
    pub notes: Vec<SongNote>,
}

/// A raw note event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SongNote {
    /// Pitch values; only the first one is consumed.
    #[serde(default)]
    pub pitches: Vec<u32>,

    /// Tick markers; at least two are required (start, end).
    #[serde(default)]
    pub points: Vec<NotePoint>,
}

/// A tick marker on a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NotePoint {
    /// Tick position, local to the note's block.
    pub tick: u32,
}

impl Song {
    /// Parses a song from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and parses a song from a JSON file.
    pub fn from_path(path: &std::path::Path) -> Result<Self, crate::error::SpecError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }

    /// Parses a song from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Serializes the song to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Length of channel 0's sequence, when the sequence schema is in use.
    pub fn sequence_count(&self) -> Option<u32> {
        self.channels
            .first()
            .and_then(|channel| channel.sequence.as_ref())
            .map(|sequence| sequence.len() as u32)
    }
}

impl SongChannel {
    /// The channel's bound instrument, when one exists.
    pub fn instrument(&self) -> Option<&Instrument> {
        self.instruments.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_minimal_song() {
        let json = r#"{
            "ticksPerBeat": 8,
            "channels": [
                {
                    "instruments": [{"wave": "square"}],
                    "patterns": [
                        {"notes": [{"pitches": [48], "points": [{"tick": 0}, {"tick": 4}]}]}
                    ],
                    "sequence": [1]
                }
            ]
        }"#;

        let song = Song::from_json(json).unwrap();
        assert_eq!(song.ticks_per_beat, 8);
        assert_eq!(song.channels.len(), 1);
        assert_eq!(song.sequence_count(), Some(1));

        let channel = &song.channels[0];
        assert_eq!(channel.instrument().unwrap().wave.as_deref(), Some("square"));
        assert_eq!(channel.patterns[0].notes[0].pitches, vec![48]);
        assert_eq!(channel.patterns[0].notes[0].points[1].tick, 4);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        // Real exports carry settings the converter never reads.
        let json = r#"{
            "format": "BeepBox",
            "version": 2,
            "scale": "expert",
            "key": "C",
            "introBars": 0,
            "loopBars": 4,
            "beatsPerBar": 8,
            "ticksPerBeat": 8,
            "beatsPerMinute": 120,
            "reverb": 0,
            "channels": [
                {
                    "octaveScrollBar": 0,
                    "instruments": [{"type": "chip", "wave": "triangle", "filter": "none", "envelope": "steady"}],
                    "patterns": [{"instrument": 1, "notes": []}]
                }
            ]
        }"#;

        let song = Song::from_json(json).unwrap();
        assert_eq!(song.channels[0].instrument().unwrap().wave.as_deref(), Some("triangle"));
        assert_eq!(song.sequence_count(), None);
    }

    #[test]
    fn test_missing_ticks_per_beat_is_a_parse_error() {
        let json = r#"{"channels": []}"#;
        assert!(Song::from_json(json).is_err());
    }

    #[test]
    fn test_from_path() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"ticksPerBeat": 8, "channels": []}}"#).unwrap();

        let song = Song::from_path(file.path()).unwrap();
        assert_eq!(song.ticks_per_beat, 8);

        let err = Song::from_path(std::path::Path::new("/nonexistent/song.json")).unwrap_err();
        assert!(matches!(err, crate::error::SpecError::Io(_)));
    }

    #[test]
    fn test_song_roundtrip() {
        let song = Song {
            ticks_per_beat: 8,
            channels: vec![SongChannel {
                instruments: vec![Instrument {
                    wave: Some("sawtooth".to_string()),
                    volume: Some(80),
                }],
                patterns: vec![SongPattern {
                    notes: vec![SongNote {
                        pitches: vec![60],
                        points: vec![NotePoint { tick: 2 }, NotePoint { tick: 6 }],
                    }],
                }],
                sequence: Some(vec![0, 1]),
            }],
        };

        let json = song.to_json().unwrap();
        let parsed = Song::from_json(&json).unwrap();
        assert_eq!(parsed, song);
    }
}
