//! Resolved track model.
//!
//! The resolver flattens the channel → sequence → pattern → note hierarchy
//! of a song export into these types. Everything here is plain data: created
//! once during resolution, immutable afterwards, consumed by the serializer.

use beepbind_spec::chip::{Wave, PLAYER_CHANNELS};

/// One resolved note event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedNote {
    /// Raw source pitch value.
    pub pitch: u8,
    /// Absolute start tick (local tick + block offset).
    pub start: u32,
    /// Absolute end tick.
    pub end: u32,
    /// Block-local duration in ticks.
    pub duration: u32,
    /// Envelope length unit derived from the duration; always >= 5.
    pub sustain: u32,
    /// Index into the runtime frequency table, when the pitch maps to one.
    pub tone: Option<u8>,
}

/// One resolved channel: a bound instrument plus its notes in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedChannel {
    /// The bound chip wave.
    pub wave: Wave,
    /// Channel volume, when the export carries one.
    pub volume: Option<u32>,
    /// Notes in discovery order. Append-only; nothing is overwritten.
    pub notes: Vec<ResolvedNote>,
}

impl ResolvedChannel {
    /// An empty channel bound to the fallback wave.
    pub fn empty() -> Self {
        Self {
            wave: Wave::Triangle,
            volume: None,
            notes: Vec::new(),
        }
    }
}

impl Default for ResolvedChannel {
    fn default() -> Self {
        Self::empty()
    }
}

/// A fully resolved track: fixed channel count, ready to serialize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTrack {
    /// Ticks per beat, copied from the source.
    pub ticks: u32,
    /// Sequence length of channel 0, when the sequence schema is in use.
    pub sequences: Option<u32>,
    /// Exactly [`PLAYER_CHANNELS`] channels. Source channels without a
    /// counterpart stay empty so the serializer always emits a fixed shape.
    pub channels: [ResolvedChannel; PLAYER_CHANNELS],
}

impl ResolvedTrack {
    /// Creates a track with the given tick rate and all channels empty.
    pub fn empty(ticks: u32) -> Self {
        Self {
            ticks,
            sequences: None,
            channels: std::array::from_fn(|_| ResolvedChannel::empty()),
        }
    }

    /// Total number of resolved notes across all channels.
    pub fn note_count(&self) -> usize {
        self.channels.iter().map(|c| c.notes.len()).sum()
    }
}
