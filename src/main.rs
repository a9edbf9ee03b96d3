//! Tilecheck CLI - validate levels and probe tile maps from the command line.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tilecheck::{EngineConfig, TileId};
use tracing_subscriber::EnvFilter;

/// Tilecheck - tile-grid collision and level validation
#[derive(Parser, Debug)]
#[command(name = "tilecheck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Engine configuration file (JSON, default: built-in values)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate one or more level files (.json)
    Validate {
        /// Level files to check
        #[arg(required = true)]
        levels: Vec<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::ReportFormat,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,
    },

    /// Summarize and draw a plain-text map file
    Map {
        /// Map file (.txt)
        #[arg(required = true)]
        map: PathBuf,

        /// Exit tile id (default: from config)
        #[arg(long)]
        level_complete: Option<TileId>,
    },

    /// Run a collision query against a plain-text map file
    Probe {
        /// Map file (.txt)
        #[arg(required = true)]
        map: PathBuf,

        /// Pixel x coordinate
        #[arg(short, long, allow_negative_numbers = true)]
        x: i32,

        /// Pixel y coordinate
        #[arg(short, long, allow_negative_numbers = true)]
        y: i32,

        /// Box width in pixels (point query if omitted)
        #[arg(long, requires = "height")]
        width: Option<i32>,

        /// Box height in pixels (point query if omitted)
        #[arg(long, requires = "width")]
        height: Option<i32>,

        /// Treat x/y as the box center
        #[arg(long)]
        centered: bool,
    },

    /// List the standard tile table
    Tiles,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = cli::load_config(args.config.as_deref()).and_then(|config| match args.command {
        Commands::Validate {
            levels,
            format,
            strict,
            progress,
            threads,
        } => cli::validate::execute(&levels, &config, format, strict, progress, threads),

        Commands::Map {
            map,
            level_complete,
        } => {
            let config = EngineConfig {
                level_complete_tile: level_complete.unwrap_or(config.level_complete_tile),
                ..config
            };
            cli::map::execute(&map, &config)
        }

        Commands::Probe {
            map,
            x,
            y,
            width,
            height,
            centered,
        } => cli::probe::execute(&map, &config, x, y, width.zip(height), centered),

        Commands::Tiles => cli::tiles::execute(),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
