//! Validate command implementation
//!
//! Validates a song export without generating source.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use beepbind_spec::validate_song;

use super::json_output::JsonDiagnostic;
use crate::input::{load_song, LoadResult};

/// Machine-readable outcome of a validate run.
#[derive(Debug, Serialize)]
struct ValidateReport {
    ok: bool,
    source_hash: String,
    errors: Vec<JsonDiagnostic>,
    warnings: Vec<JsonDiagnostic>,
}

/// Run the validate command.
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(spec_path: &str, json_output: bool) -> Result<ExitCode> {
    let LoadResult { song, source_hash } = load_song(Path::new(spec_path))
        .with_context(|| format!("Failed to load song file: {}", spec_path))?;

    let result = validate_song(&song);

    if json_output {
        let report = ValidateReport {
            ok: result.is_ok(),
            source_hash,
            errors: result.errors.iter().map(JsonDiagnostic::from).collect(),
            warnings: result.warnings.iter().map(JsonDiagnostic::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} {}", "Validating:".cyan().bold(), spec_path);
        println!("{} {}", "Source:".dimmed(), &source_hash[..16]);

        if !result.errors.is_empty() {
            println!("\n{}", "Errors:".red().bold());
            for error in &result.errors {
                let path_info = error
                    .path
                    .as_ref()
                    .map(|p| format!(" at {}", p))
                    .unwrap_or_default();
                println!(
                    "  {} [{}]{}: {}",
                    "x".red(),
                    error.code.to_string().red(),
                    path_info.dimmed(),
                    error.message
                );
            }
        }

        if !result.warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for warning in &result.warnings {
                let path_info = warning
                    .path
                    .as_ref()
                    .map(|p| format!(" at {}", p))
                    .unwrap_or_default();
                println!(
                    "  {} [{}]{}: {}",
                    "!".yellow(),
                    warning.code.to_string().yellow(),
                    path_info.dimmed(),
                    warning.message
                );
            }
        }

        if result.is_ok() {
            println!("\n{} Song is valid", "SUCCESS".green().bold());
        } else {
            println!(
                "\n{} Song has {} error(s)",
                "FAILED".red().bold(),
                result.errors.len()
            );
        }
    }

    if result.is_ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
