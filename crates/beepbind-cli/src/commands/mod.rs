//! Command implementations for the beepbind CLI.

pub mod convert;
pub mod json_output;
pub mod validate;
