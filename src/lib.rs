pub mod cli;
pub mod config;
pub mod formats;
pub mod model;
pub mod points;
pub mod readers;
pub mod runtime;
pub mod transform;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
