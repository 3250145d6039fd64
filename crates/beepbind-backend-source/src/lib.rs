//! beepbind source backend - deterministic chip-player source generation.
//!
//! This crate turns a parsed BeepBox song export into Rust source text for a
//! fixed 4-channel chip-style player, in two pure steps:
//!
//! - [`resolve`]: flatten the channel → sequence → pattern → note hierarchy
//!   into a [`ResolvedTrack`] with absolute ticks and derived sustain/tone
//!   values.
//! - [`render`]: serialize the track as a `Track` struct literal with
//!   fixed-width hexadecimal note triples, optionally prefixed by the
//!   embedded driver template.
//!
//! Both steps are deterministic: the same export always produces
//! byte-identical output.
//!
//! # Example
//!
//! ```
//! use beepbind_spec::Song;
//! use beepbind_backend_source::{render, resolve, RenderMode};
//!
//! let song = Song::from_json(r#"{
//!     "ticksPerBeat": 8,
//!     "channels": [{
//!         "instruments": [{"wave": "square"}],
//!         "patterns": [
//!             {"notes": [{"pitches": [48], "points": [{"tick": 0}, {"tick": 4}]}]}
//!         ],
//!         "sequence": [1]
//!     }]
//! }"#).unwrap();
//!
//! let track = resolve(&song).unwrap();
//! let source = render(&track, "INTRO", RenderMode::List, false).unwrap();
//! assert!(source.contains("pub static INTRO: Track"));
//! ```

pub mod note;
pub mod render;
pub mod resolve;
pub mod track;

// Re-export main types
pub use note::{pitch_name, pitch_to_tone, sustain_for_duration, MIN_SUSTAIN};
pub use render::{render, RenderError, RenderMode, DRIVER_TEMPLATE};
pub use resolve::{resolve, ResolveError};
pub use track::{ResolvedChannel, ResolvedNote, ResolvedTrack};

/// Crate version for backend identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend identifier for reports.
pub const BACKEND_ID: &str = "beepbind-backend-source";
