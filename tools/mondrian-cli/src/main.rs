//! Mondrian CLI: drive the transcription engine from the command line.
//!
//! Usage:
//!   mondrian replay <SCRIPT> --floor-plan <IMG> --duration <SECS>
//!                                  Replay a scripted session and export paths
//!   mondrian probe <IMG>           Show floor plan dimensions
//!   mondrian validate <CSV>        Check an exported path table

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod script;

#[derive(Parser)]
#[command(
    name = "mondrian",
    about = "Transcribe movement over a floor plan in sync with a video",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON logs
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scripted session against a simulated video clock
    Replay {
        /// Session script (JSON lines)
        script: PathBuf,

        /// Floor plan image (PNG or JPG)
        #[arg(long)]
        floor_plan: PathBuf,

        /// Video length in seconds
        #[arg(long)]
        duration: f64,

        /// Directory for exported Path_<N>.csv files [default: from config]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Frames per second of the simulated frame loop
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Display size as WIDTHxHEIGHT; the floor plan fills the right half
        #[arg(long, default_value = "1600x900", value_parser = commands::replay::parse_display)]
        display: (f64, f64),

        /// Rewind/fast-forward interval in seconds [default: from config]
        #[arg(long)]
        jump: Option<f64>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the pixel dimensions of a floor plan image
    Probe {
        /// Floor plan image (PNG or JPG)
        path: PathBuf,
    },

    /// Validate an exported path table
    Validate {
        /// Path to a Path_<N>.csv file
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = mondrian_common::config::AppConfig::load();
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if cli.json_logs {
        logging.json = true;
    }
    mondrian_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Replay {
            script,
            floor_plan,
            duration,
            output,
            fps,
            display,
            jump,
            json,
        } => commands::replay::run(
            &config,
            commands::replay::ReplayArgs {
                script,
                floor_plan,
                duration,
                output: output.unwrap_or_else(|| config.output_dir.clone()),
                fps,
                display,
                jump,
                json,
            },
        ),
        Commands::Probe { path } => commands::probe::run(path),
        Commands::Validate { path } => commands::validate::run(path),
    }
}
