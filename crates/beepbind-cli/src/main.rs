//! beepbind CLI - BeepBox song exports to chip-player source
//!
//! This binary converts BeepBox (v2.3) JSON song exports into Rust source
//! for a fixed 4-channel chip-style player.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use beepbind_backend_source::RenderMode;
use beepbind_cli::commands;

/// beepbind - BeepBox song exports to chip-player source
#[derive(Parser)]
#[command(name = "beepbind")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a song export into Rust source
    Convert {
        /// Path to the BeepBox JSON export
        #[arg(short, long)]
        spec: String,

        /// Identifier for the generated binding, used verbatim
        #[arg(short, long)]
        name: String,

        /// Prefix the embedded driver template
        #[arg(long)]
        driver: bool,

        /// Note table layout (list, slots)
        #[arg(long, default_value = "list", value_parser = ["list", "slots"])]
        mode: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Output a machine-readable JSON report (requires --output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a song export without generating source
    Validate {
        /// Path to the BeepBox JSON export
        #[arg(short, long)]
        spec: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            spec,
            name,
            driver,
            mode,
            output,
            json,
        } => {
            let mode = mode
                .parse::<RenderMode>()
                .expect("clap should have validated mode");
            commands::convert::run(&spec, &name, mode, driver, output.as_deref(), json)
        }
        Commands::Validate { spec, json } => commands::validate::run(&spec, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
