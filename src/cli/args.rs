use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "image-triage")]
#[command(about = "Extract multi-volume wallpaper archives and sort images by orientation")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (debug)
    #[arg(short, long, global = true, action = ArgAction::SetTrue, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 出力ディレクトリの上書き指定
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OutputDirs {
    /// Output directory for portrait images
    #[arg(long)]
    pub mobile_dir: Option<PathBuf>,

    /// Output directory for landscape images
    #[arg(long)]
    pub pc_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract every archive under the input directory and sort the images
    Run {
        /// Input directory containing one folder per issue
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[command(flatten)]
        outputs: OutputDirs,

        /// Archive password
        #[arg(short, long, env = "IMAGE_TRIAGE_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// File name suffix of the first volume
        #[arg(short, long)]
        suffix: Option<String>,

        /// List what would be processed without changing anything
        #[arg(long)]
        dry_run: bool,

        /// Write a JSON run report to this file
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// List the archives that would be processed
    Catalog {
        /// Input directory containing one folder per issue
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// File name suffix of the first volume
        #[arg(short, long)]
        suffix: Option<String>,
    },

    /// Sort the images of a directory without extracting anything
    Classify {
        /// Directory to classify
        directory: PathBuf,

        /// Issue label to embed in the output names
        #[arg(short, long)]
        label: Option<String>,

        #[command(flatten)]
        outputs: OutputDirs,
    },

    /// Remove empty directories below a directory
    Prune {
        /// Root directory (kept even if empty)
        directory: PathBuf,
    },

    /// Delete files whose size matches exactly
    Sweep {
        /// Directory to sweep
        directory: PathBuf,

        /// File size in bytes
        #[arg(long)]
        size: u64,

        /// List matches without deleting
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete previously sorted mobile_* and pc_* files
    Purge {
        #[command(flatten)]
        outputs: OutputDirs,

        /// Skip confirmation prompt
        #[arg(long)]
        no_confirm: bool,
    },
}
