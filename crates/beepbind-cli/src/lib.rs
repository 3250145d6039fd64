//! beepbind CLI library.
//!
//! This crate provides the functionality behind the `beepbind` binary:
//! song loading and the convert/validate commands.

pub mod commands;
pub mod input;
