//! Song validation logic.

use crate::chip::{Wave, PITCHES, PLAYER_CHANNELS, TICKS_PER_BLOCK};
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::song::{Song, SongChannel, SongNote};

/// Validates a song and returns a validation result.
///
/// Validation is advisory: the resolver re-checks every error case itself.
/// Errors cover structure the conversion cannot survive; warnings cover
/// input the conversion handles but probably not the way the author meant.
///
/// # Example
/// ```
/// use beepbind_spec::Song;
/// use beepbind_spec::validation::validate_song;
///
/// let song = Song::from_json(r#"{
///     "ticksPerBeat": 8,
///     "channels": [{
///         "instruments": [{"wave": "square"}],
///         "patterns": [{"notes": []}]
///     }]
/// }"#).unwrap();
///
/// assert!(validate_song(&song).is_ok());
/// ```
pub fn validate_song(song: &Song) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_ticks(song, &mut result);
    validate_channel_count(song, &mut result);

    for (index, channel) in song.channels.iter().enumerate().take(PLAYER_CHANNELS) {
        validate_channel(index, channel, &mut result);
    }

    result
}

/// Validates the ticks-per-beat field.
fn validate_ticks(song: &Song, result: &mut ValidationResult) {
    if song.ticks_per_beat == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::ZeroTicksPerBeat,
            "ticksPerBeat must be greater than zero",
            "ticksPerBeat",
        ));
    }
}

/// Validates the channel list shape.
fn validate_channel_count(song: &Song, result: &mut ValidationResult) {
    if song.channels.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoChannels,
            "song has no channels",
            "channels",
        ));
    } else if song.channels.len() > PLAYER_CHANNELS {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::ExtraChannels,
            format!(
                "song has {} channels; only the first {} are converted",
                song.channels.len(),
                PLAYER_CHANNELS
            ),
            format!("channels[{}]", PLAYER_CHANNELS),
        ));
    }
}

/// Validates one consumed channel.
fn validate_channel(index: usize, channel: &SongChannel, result: &mut ValidationResult) {
    match channel.instrument() {
        None => {
            result.add_error(ValidationError::with_path(
                ErrorCode::MissingInstrument,
                format!("channel {} has no instruments", index),
                format!("channels[{}].instruments[0]", index),
            ));
        }
        Some(instrument) => {
            if let Some(ref wave) = instrument.wave {
                if Wave::from_name(wave).is_none() {
                    result.add_warning(ValidationWarning::with_path(
                        WarningCode::UnknownWave,
                        format!("unknown wave '{}'; triangle will be used", wave),
                        format!("channels[{}].instruments[0].wave", index),
                    ));
                }
            }
        }
    }

    if let Some(ref sequence) = channel.sequence {
        for (position, &entry) in sequence.iter().enumerate() {
            // Entry 0 is silence, never an error.
            if entry > channel.patterns.len() as u32 {
                result.add_error(ValidationError::with_path(
                    ErrorCode::SequenceOutOfRange,
                    format!(
                        "sequence entry {} references pattern {} but the channel has {} patterns",
                        position,
                        entry,
                        channel.patterns.len()
                    ),
                    format!("channels[{}].sequence[{}]", index, position),
                ));
            }
        }
    }

    for (pattern_index, pattern) in channel.patterns.iter().enumerate() {
        for (note_index, note) in pattern.notes.iter().enumerate() {
            let path = format!(
                "channels[{}].patterns[{}].notes[{}]",
                index, pattern_index, note_index
            );
            validate_note(note, &path, result);
        }
    }
}

/// Validates one raw note.
fn validate_note(note: &SongNote, path: &str, result: &mut ValidationResult) {
    if note.pitches.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyNotePitches,
            "note has no pitches",
            format!("{}.pitches", path),
        ));
    } else if !PITCHES.contains(&note.pitches[0]) {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::PitchOutsideTable,
            format!(
                "pitch {} is outside the fixed tone table and will be silent in slot mode",
                note.pitches[0]
            ),
            format!("{}.pitches[0]", path),
        ));
    }

    if note.points.len() < 2 {
        result.add_error(ValidationError::with_path(
            ErrorCode::MissingNotePoints,
            format!("note needs at least 2 points, found {}", note.points.len()),
            format!("{}.points", path),
        ));
        return;
    }

    let start = note.points[0].tick;
    let end = note.points[1].tick;
    if end < start {
        result.add_error(ValidationError::with_path(
            ErrorCode::NotePointsOutOfOrder,
            format!("note ends at tick {} before it starts at tick {}", end, start),
            format!("{}.points", path),
        ));
    }
    if start >= TICKS_PER_BLOCK {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::TickOutsideBlock,
            format!(
                "start tick {} is at or beyond the {}-tick block window",
                start, TICKS_PER_BLOCK
            ),
            format!("{}.points[0].tick", path),
        ));
    }
}
