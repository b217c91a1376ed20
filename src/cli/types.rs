use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "regio",
    version,
    about = "Loads registration and cell detection outputs for overlay on the raw sample"
)]
pub(super) struct Cli {
    #[command(flatten)]
    pub(super) global: GlobalArgs,

    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Args)]
pub(super) struct GlobalArgs {
    /// Settings file (YAML for .yaml/.yml, JSON otherwise).
    #[arg(long, global = true)]
    pub(super) config: Option<PathBuf>,

    /// Directory holding reference atlases.
    #[arg(long, global = true)]
    pub(super) atlas_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Summarizes a registration directory in atlas space.
    Inspect { dir: PathBuf },
    /// Summarizes a registration directory moved into sample space.
    SampleSpace {
        dir: PathBuf,
        /// Writes each volume as `<name>.tiff` plus `layers.json` here.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Summarizes a cell detection output directory.
    Detection { dir: PathBuf },
    Points {
        #[command(subcommand)]
        command: PointsCommand,
    },
}

#[derive(Debug, Subcommand)]
pub(super) enum PointsCommand {
    Info { input: PathBuf },
    /// Output format follows the output extension.
    Convert { input: PathBuf, output: PathBuf },
}
