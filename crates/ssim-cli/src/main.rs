mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 SSIM CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let command_result = AppConfig::from_file(&cli.config).and_then(|config| match cli.command {
        Commands::Summary(args) => {
            info!("Dispatching to 'summary' command.");
            commands::summary::run(args, &config)
        }
        Commands::Violin(args) => {
            info!("Dispatching to 'violin' command.");
            commands::violin::run(args, &config)
        }
        Commands::Distribution(args) => {
            info!("Dispatching to 'distribution' command.");
            commands::distribution::run(args, &config)
        }
        Commands::Heatmap(args) => {
            info!("Dispatching to 'heatmap' command.");
            commands::heatmap::run(args, &config)
        }
        Commands::Cab(args) => {
            info!("Dispatching to 'cab' command.");
            commands::cab::run(args, &config)
        }
    });

    match &command_result {
        Ok(_) => {
            info!("✅ Command completed successfully.");
            println!("✅ Command completed successfully.");
        }
        Err(e) => {
            error!("❌ Command failed: {}", e);
            eprintln!("❌ Command failed: {}", e);
        }
    }

    command_result
}
