//! Convert command implementation
//!
//! Converts a BeepBox song export into chip-player Rust source.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use beepbind_backend_source::{render, resolve, RenderMode};
use beepbind_spec::{validate_song, ValidationResult};

use super::json_output::JsonDiagnostic;
use crate::input::{load_song, LoadResult};

/// Machine-readable outcome of a convert run.
#[derive(Debug, Serialize)]
struct ConvertReport {
    ok: bool,
    name: String,
    mode: String,
    source_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ticks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sequences: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes_per_channel: Option<Vec<usize>>,
    errors: Vec<JsonDiagnostic>,
    warnings: Vec<JsonDiagnostic>,
}

/// Run the convert command.
///
/// The generated source goes to stdout unless `--output` names a file, so
/// human diagnostics go to stderr. With `--json` the report owns stdout and
/// an output file is required.
///
/// # Returns
/// Exit code: 0 on success, 1 when the song fails validation
pub fn run(
    spec_path: &str,
    name: &str,
    mode: RenderMode,
    driver: bool,
    output: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output && output.is_none() {
        bail!("--json writes a report to stdout; use --output for the generated source");
    }

    if !json_output {
        eprintln!("{} {}", "Converting:".cyan().bold(), spec_path);
    }

    let LoadResult { song, source_hash } = load_song(Path::new(spec_path))
        .with_context(|| format!("Failed to load song file: {}", spec_path))?;

    if !json_output {
        eprintln!("{} {}", "Source:".dimmed(), &source_hash[..16]);
    }

    let validation = validate_song(&song);
    if !validation.is_ok() {
        if json_output {
            print_report(failure_report(name, mode, &source_hash, &validation))?;
        } else {
            print_diagnostics(&validation);
            eprintln!(
                "{} song has {} error(s)",
                "FAILED".red().bold(),
                validation.errors.len()
            );
        }
        return Ok(ExitCode::from(1));
    }

    let track = resolve(&song).context("Song resolution failed")?;
    let source = render(&track, name, mode, driver).context("Source rendering failed")?;

    match output {
        Some(path) => {
            std::fs::write(path, &source)
                .with_context(|| format!("Failed to write output file: {}", path))?;
        }
        None => print!("{}", source),
    }

    if json_output {
        print_report(ConvertReport {
            ok: true,
            name: name.to_string(),
            mode: mode.to_string(),
            source_hash,
            output: output.map(|p| p.to_string()),
            ticks: Some(track.ticks),
            sequences: track.sequences,
            notes_per_channel: Some(track.channels.iter().map(|c| c.notes.len()).collect()),
            errors: Vec::new(),
            warnings: validation.warnings.iter().map(JsonDiagnostic::from).collect(),
        })?;
    } else {
        print_diagnostics(&validation);
        eprintln!(
            "{} generated {} ({} notes, {} mode)",
            "SUCCESS".green().bold(),
            name,
            track.note_count(),
            mode
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Build the report for a song that failed validation.
fn failure_report(
    name: &str,
    mode: RenderMode,
    source_hash: &str,
    validation: &ValidationResult,
) -> ConvertReport {
    ConvertReport {
        ok: false,
        name: name.to_string(),
        mode: mode.to_string(),
        source_hash: source_hash.to_string(),
        output: None,
        ticks: None,
        sequences: None,
        notes_per_channel: None,
        errors: validation.errors.iter().map(JsonDiagnostic::from).collect(),
        warnings: validation.warnings.iter().map(JsonDiagnostic::from).collect(),
    }
}

/// Print a report to stdout.
fn print_report(report: ConvertReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Print validation diagnostics to stderr.
fn print_diagnostics(validation: &ValidationResult) {
    for error in &validation.errors {
        let path_info = error
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        eprintln!(
            "  {} [{}]{}: {}",
            "x".red(),
            error.code.to_string().red(),
            path_info.dimmed(),
            error.message
        );
    }
    for warning in &validation.warnings {
        let path_info = warning
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        eprintln!(
            "  {} [{}]{}: {}",
            "!".yellow(),
            warning.code.to_string().yellow(),
            path_info.dimmed(),
            warning.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn song_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", json).unwrap();
        file
    }

    #[test]
    fn test_convert_writes_output_file() {
        let file = song_file(
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
        );
        let out = tempfile::NamedTempFile::new().unwrap();
        let out_path = out.path().to_str().unwrap().to_string();

        run(
            file.path().to_str().unwrap(),
            "INTRO",
            RenderMode::List,
            false,
            Some(&out_path),
            false,
        )
        .unwrap();

        let generated = std::fs::read_to_string(&out_path).unwrap();
        assert!(generated.contains("pub static INTRO: Track"));
        assert!(generated.contains("[0x00, 0x30, 0x0f],"));
    }

    #[test]
    fn test_invalid_song_produces_no_output() {
        let file = song_file(r#"{"ticksPerBeat": 0, "channels": []}"#);
        let out = tempfile::NamedTempFile::new().unwrap();
        let out_path = out.path().to_str().unwrap().to_string();

        run(
            file.path().to_str().unwrap(),
            "INTRO",
            RenderMode::List,
            false,
            Some(&out_path),
            false,
        )
        .unwrap();

        assert_eq!(std::fs::read_to_string(&out_path).unwrap(), "");
    }

    #[test]
    fn test_json_requires_output() {
        let file = song_file(r#"{"ticksPerBeat": 8, "channels": []}"#);
        let result = run(
            file.path().to_str().unwrap(),
            "INTRO",
            RenderMode::List,
            false,
            None,
            true,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = run(
            "/nonexistent/song.json",
            "INTRO",
            RenderMode::List,
            false,
            None,
            false,
        );
        assert!(result.is_err());
    }
}
