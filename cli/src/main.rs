use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use taskdesk::{
    commands::{execute, Cli},
    config::Config,
    setup::initialize_service,
    telemetry::{init_telemetry, log_config_validation, log_startup_info},
};
use tracing::{debug, error};

/// Exit status for configuration and store start-up errors
const STARTUP_FAILURE: u8 = 2;

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(config_file) => Config::from_file(config_file)?,
        None => Config::from_env()?,
    };

    // Apply CLI overrides
    if let Some(ref database_url) = cli.database_url {
        config.database.url = Some(database_url.clone());
    }

    if let Some(ref log_level) = cli.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

async fn run(cli: Cli) -> Result<u8> {
    let config = load_config(&cli).context("Failed to load configuration")?;

    init_telemetry(&config.logging).context("Failed to initialize telemetry")?;
    log_config_validation(&config);
    config.validate().context("Invalid configuration")?;
    log_startup_info(&config);

    let service = initialize_service(&config)
        .await
        .context("Failed to initialize application")?;

    debug!(command = ?cli.command, "Executing command");
    let response = execute(cli.command, &service).await;
    println!("{}", response.render(cli.json)?.trim_end());

    Ok(response.exit_code())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!(error = %e, "Start-up failed");
            eprintln!("Error: {e:#}");
            ExitCode::from(STARTUP_FAILURE)
        }
    }
}
