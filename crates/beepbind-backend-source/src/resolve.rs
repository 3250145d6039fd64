//! Song resolution.
//!
//! Walks the channel → sequence → pattern → note hierarchy of a song export
//! and produces a flat [`ResolvedTrack`]. Resolution is pure and total over
//! well-formed input; malformed input fails with an error naming the
//! offending JSON path, never with a partial track.

use thiserror::Error;

use beepbind_spec::chip::{Wave, PLAYER_CHANNELS, TICKS_PER_BLOCK};
use beepbind_spec::song::{Song, SongChannel, SongNote, SongPattern};

use crate::note::{pitch_to_tone, sustain_for_duration};
use crate::track::{ResolvedChannel, ResolvedNote, ResolvedTrack};

/// Errors that can occur during resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("channel {channel} has no instruments (at channels[{channel}].instruments[0])")]
    MissingInstrument { channel: usize },

    #[error(
        "sequence entry {position} references pattern {index} but channel {channel} has \
         {patterns} patterns (at channels[{channel}].sequence[{position}])"
    )]
    PatternOutOfRange {
        channel: usize,
        position: usize,
        index: u32,
        patterns: usize,
    },

    #[error(
        "note needs at least 2 points, found {found} \
         (at channels[{channel}].patterns[{pattern}].notes[{note}].points)"
    )]
    MissingPoints {
        channel: usize,
        pattern: usize,
        note: usize,
        found: usize,
    },

    #[error("note has no pitches (at channels[{channel}].patterns[{pattern}].notes[{note}].pitches)")]
    MissingPitch {
        channel: usize,
        pattern: usize,
        note: usize,
    },

    #[error(
        "note ends at tick {end} before it starts at tick {start} \
         (at channels[{channel}].patterns[{pattern}].notes[{note}].points)"
    )]
    PointsOutOfOrder {
        channel: usize,
        pattern: usize,
        note: usize,
        start: u32,
        end: u32,
    },

    #[error(
        "pitch {pitch} does not fit a byte \
         (at channels[{channel}].patterns[{pattern}].notes[{note}].pitches[0])"
    )]
    PitchOutOfRange {
        channel: usize,
        pattern: usize,
        note: usize,
        pitch: u32,
    },
}

/// Resolve a song export into a flat track.
///
/// Source channels beyond the player's channel count are skipped; missing
/// ones leave their resolved channel empty. A sequence entry of 0 emits
/// nothing for its block.
pub fn resolve(song: &Song) -> Result<ResolvedTrack, ResolveError> {
    let mut track = ResolvedTrack::empty(song.ticks_per_beat);
    track.sequences = song.sequence_count();

    for (index, channel) in song.channels.iter().enumerate().take(PLAYER_CHANNELS) {
        track.channels[index] = resolve_channel(index, channel)?;
    }

    Ok(track)
}

/// Resolve one source channel.
fn resolve_channel(index: usize, channel: &SongChannel) -> Result<ResolvedChannel, ResolveError> {
    let instrument = channel
        .instrument()
        .ok_or(ResolveError::MissingInstrument { channel: index })?;

    let wave = instrument
        .wave
        .as_deref()
        .and_then(Wave::from_name)
        .unwrap_or(Wave::Triangle);

    let mut resolved = ResolvedChannel {
        wave,
        volume: instrument.volume,
        notes: Vec::new(),
    };

    match channel.sequence {
        Some(ref sequence) => {
            for (block, &entry) in sequence.iter().enumerate() {
                if entry == 0 {
                    // Silence: the block stays empty.
                    continue;
                }
                let pattern_index = (entry - 1) as usize;
                let pattern = channel.patterns.get(pattern_index).ok_or(
                    ResolveError::PatternOutOfRange {
                        channel: index,
                        position: block,
                        index: entry,
                        patterns: channel.patterns.len(),
                    },
                )?;
                resolve_block(index, pattern_index, pattern, block as u32, &mut resolved.notes)?;
            }
        }
        None => {
            for (block, pattern) in channel.patterns.iter().enumerate() {
                resolve_block(index, block, pattern, block as u32, &mut resolved.notes)?;
            }
        }
    }

    Ok(resolved)
}

/// Resolve every note of one pattern at the given block index.
fn resolve_block(
    channel: usize,
    pattern_index: usize,
    pattern: &SongPattern,
    block: u32,
    notes: &mut Vec<ResolvedNote>,
) -> Result<(), ResolveError> {
    for (note_index, note) in pattern.notes.iter().enumerate() {
        notes.push(resolve_note(channel, pattern_index, note_index, note, block)?);
    }
    Ok(())
}

/// Resolve one raw note at the given block index.
fn resolve_note(
    channel: usize,
    pattern: usize,
    index: usize,
    note: &SongNote,
    block: u32,
) -> Result<ResolvedNote, ResolveError> {
    if note.points.len() < 2 {
        return Err(ResolveError::MissingPoints {
            channel,
            pattern,
            note: index,
            found: note.points.len(),
        });
    }

    let raw_pitch = *note.pitches.first().ok_or(ResolveError::MissingPitch {
        channel,
        pattern,
        note: index,
    })?;
    let pitch = u8::try_from(raw_pitch).map_err(|_| ResolveError::PitchOutOfRange {
        channel,
        pattern,
        note: index,
        pitch: raw_pitch,
    })?;

    let start_local = note.points[0].tick;
    let end_local = note.points[1].tick;
    if end_local < start_local {
        return Err(ResolveError::PointsOutOfOrder {
            channel,
            pattern,
            note: index,
            start: start_local,
            end: end_local,
        });
    }

    let duration = end_local - start_local;
    let offset = block * TICKS_PER_BLOCK;

    Ok(ResolvedNote {
        pitch,
        start: start_local + offset,
        end: end_local + offset,
        duration,
        sustain: sustain_for_duration(duration),
        tone: pitch_to_tone(raw_pitch),
    })
}
