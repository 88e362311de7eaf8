use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vidsplit_av::Container;

#[derive(Parser)]
#[command(name = "vidsplit")]
#[command(author, version, about = "Split a video into fixed-length segments")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a video into segments and save them into the library
    Split {
        /// Input video file
        #[arg(required = true)]
        input: PathBuf,

        /// Segment length in whole seconds
        #[arg(short, long)]
        seconds: u64,

        /// Library directory segments are saved into (overrides config)
        #[arg(short, long)]
        library: Option<PathBuf>,

        /// Output container format (mp4 or mov, overrides config)
        #[arg(long)]
        container: Option<Container>,

        /// Skip the confirmation prompt for large segment counts
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Probe a media file and display information
    Probe {
        /// File to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
