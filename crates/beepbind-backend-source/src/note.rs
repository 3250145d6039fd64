//! Note conversion utilities.
//!
//! This module provides deterministic conversion from raw BeepBox pitch and
//! duration values to the discrete tone/sustain units the playback runtime
//! consumes.

use beepbind_spec::chip::{NOTE_NAMES, PITCHES};

/// Minimum audible sustain value.
pub const MIN_SUSTAIN: u32 = 5;

/// Convert a raw pitch to a tone index in the fixed frequency table.
///
/// Index 0 is reserved, so a hit at index 0 resolves to `None` just like a
/// pitch that is absent from the table. The runtime renders `None` as the
/// silence sentinel.
///
/// # Arguments
/// * `pitch` - Raw BeepBox pitch value
///
/// # Returns
/// Tone index (1-36), or `None` for silence/invalid
///
/// # Examples
/// ```
/// use beepbind_backend_source::note::pitch_to_tone;
///
/// assert_eq!(pitch_to_tone(48), Some(12));
/// assert_eq!(pitch_to_tone(36), None); // index 0 is reserved
/// assert_eq!(pitch_to_tone(97), None); // outside the table
/// ```
pub fn pitch_to_tone(pitch: u32) -> Option<u8> {
    match PITCHES.iter().position(|&p| p == pitch) {
        Some(0) | None => None,
        Some(index) => Some(index as u8),
    }
}

/// Look up the display name for a raw pitch.
///
/// # Examples
/// ```
/// use beepbind_backend_source::note::pitch_name;
///
/// assert_eq!(pitch_name(48), Some("C1"));
/// assert_eq!(pitch_name(97), None);
/// ```
pub fn pitch_name(pitch: u32) -> Option<&'static str> {
    PITCHES
        .iter()
        .position(|&p| p == pitch)
        .map(|index| NOTE_NAMES[index])
}

/// Derive the sustain value from a note duration.
///
/// Coarse tracker durations map onto a coarser envelope-length unit: short
/// notes get the minimum audible sustain, longer notes scale linearly.
///
/// # Examples
/// ```
/// use beepbind_backend_source::note::sustain_for_duration;
///
/// assert_eq!(sustain_for_duration(0), 5);
/// assert_eq!(sustain_for_duration(2), 5);
/// assert_eq!(sustain_for_duration(3), 10);
/// assert_eq!(sustain_for_duration(4), 15);
/// ```
pub fn sustain_for_duration(duration: u32) -> u32 {
    if duration <= 2 {
        MIN_SUSTAIN
    } else {
        duration * 5 - 5
    }
}
