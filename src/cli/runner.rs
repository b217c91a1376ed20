use clap::Parser;
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::config::{Settings, load_settings};
use crate::runtime::{AppContext, LayerSummary};

use super::types::{Cli, Commands, PointsCommand};

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let mut settings = match &cli.global.config {
        Some(path) => load_settings(path).map_err(|error| error.to_string())?,
        None => Settings::default(),
    };
    if let Some(dir) = cli.global.atlas_dir {
        settings.atlas_dir = Some(dir);
    }
    init_tracing(&settings.log_filter);
    let app = AppContext::new(settings);

    match cli.command {
        Commands::Inspect { dir } => {
            let layers = app
                .registration_service()
                .read_atlas_space(&dir)
                .map_err(|error| error.to_string())?;
            print_json(&LayerSummary::of(&layers))?;
        }
        Commands::SampleSpace { dir, output } => {
            let layers = app
                .registration_service()
                .read_sample_space(&dir)
                .map_err(|error| error.to_string())?;
            match output {
                Some(output) => {
                    let written = app
                        .volume_service()
                        .export_layers(&output, &layers)
                        .map_err(|error| error.to_string())?;
                    print_json(&json!({"status": "ok", "written": written}))?;
                }
                None => print_json(&LayerSummary::of(&layers))?,
            }
        }
        Commands::Detection { dir } => {
            let layers = app
                .registration_service()
                .read_detection(&dir)
                .map_err(|error| error.to_string())?;
            print_json(&LayerSummary::of(&layers))?;
        }
        Commands::Points { command } => match command {
            PointsCommand::Info { input } => {
                let info = app
                    .points_service()
                    .info(&input)
                    .map_err(|error| error.to_string())?;
                print_json(&info)?;
            }
            PointsCommand::Convert { input, output } => {
                let written = app
                    .points_service()
                    .convert(&input, &output)
                    .map_err(|error| error.to_string())?;
                print_json(&json!({"status": "ok", "output": written}))?;
            }
        },
    }

    Ok(())
}

// RUST_LOG wins over the configured filter.
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_json(value: &impl Serialize) -> Result<(), String> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).map_err(|error| error.to_string())?
    );
    Ok(())
}
