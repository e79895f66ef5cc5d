//! nxcopy command-line interface.
//!
//! Builds a NeXus description next to a detector payload file, linking the
//! payload instead of copying it.

use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use nxcopy_core::{AxisSelection, AxisStrategy, CopyOptions, LinkMode, DEFAULT_STEP};
use nxcopy_io::{copy_nexus, inspect};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    NxcopyIo(#[from] nxcopy_io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Scan-axis handling.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Axis {
    /// Choose from the detector description (Timepix -> pair)
    Auto,
    /// Copy the axis dataset as it is
    Direct,
    /// Expand a (start, stop) pair with --step
    Pair,
}

/// Merge detector output and a NeXus template into one linked description.
#[derive(Parser)]
#[command(name = "nxcopy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write <PAYLOAD stem>.nxs from a template description
    Copy {
        /// Detector payload file (created from the template if missing)
        payload: PathBuf,

        /// Template NeXus description
        source: PathBuf,

        /// Link every top-level payload member (event data)
        #[arg(long)]
        event_mode: bool,

        /// Reverse entry/instrument/detector/module/data_size
        #[arg(long)]
        flip: bool,

        /// Scan-axis handling
        #[arg(long, value_enum, default_value = "auto")]
        axis: Axis,

        /// Angle increment for pair expansion
        #[arg(long, default_value_t = DEFAULT_STEP)]
        step: f64,

        /// Axis dataset name, instead of the single attributed dataset
        #[arg(long)]
        axis_name: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a template would be handled
    Inspect {
        /// Template NeXus description
        source: PathBuf,

        /// Axis dataset name, instead of the single attributed dataset
        #[arg(long)]
        axis_name: Option<String>,
    },
}

fn selection(axis_name: Option<String>) -> AxisSelection {
    axis_name.map_or(AxisSelection::SingleAttributed, AxisSelection::Named)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Copy {
            payload,
            source,
            event_mode,
            flip,
            axis,
            step,
            axis_name,
            json,
        } => {
            let strategy = match axis {
                Axis::Auto => AxisStrategy::Auto { step },
                Axis::Direct => AxisStrategy::Direct,
                Axis::Pair => AxisStrategy::CompressedPair { step },
            };
            let options = CopyOptions::default()
                .with_axis(strategy)
                .with_selection(selection(axis_name))
                .with_link_mode(LinkMode::from_event_flag(event_mode))
                .with_flip_data_size(flip);
            debug!("{options:?}");

            let report = copy_nexus(&payload, &source, &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Wrote: {}", report.output.display());
                println!("Axis: {} ({} points)", report.axis, report.axis_len);
                println!("Links: {}", report.links.join(", "));
                if report.payload_created {
                    println!("Payload created from template: {}", payload.display());
                }
                if report.flipped {
                    println!("data_size reversed");
                }
            }
        }

        Commands::Inspect { source, axis_name } => {
            let summary = inspect(&source, &selection(axis_name))?;

            println!("File: {}", source.display());
            println!("Entry: {}", summary.entry_children.join(", "));
            println!("Data: {}", summary.data_members.join(", "));
            println!(
                "Detector: {}",
                summary.detector.as_deref().unwrap_or("(no description)")
            );
            println!("Axis mode: {:?}", summary.mode);
            match summary.axis {
                Ok(name) => println!("Axis: {name}"),
                Err(err) => println!("Axis: {err}"),
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
