//! arrbot entry point - the composition root.
//!
//! Loads the env file, initialises logging, reads the configuration and
//! hands a bootstrapped context to the dispatcher.

use std::path::PathBuf;

use arrbot_bot::{BotError, Cli, bootstrap, config, handlers};
use clap::Parser;
use teloxide::Bot;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing() {
    // Priority: RUST_LOG env var > default
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config::DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
        .ok();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load the env file before logging so RUST_LOG can come from it
    let env_file = config::load_env_file(cli.env_file.as_deref());
    init_tracing();

    if let Err(err) = run(&cli, env_file).await {
        tracing::error!("{err:#}");
        let code = err.downcast_ref::<BotError>().map_or(1, BotError::exit_code);
        std::process::exit(code);
    }
}

async fn run(cli: &Cli, env_file: Result<Option<PathBuf>, BotError>) -> anyhow::Result<()> {
    match env_file? {
        Some(path) => tracing::info!(path = %path.display(), "Loaded env file"),
        None => tracing::debug!("No .env file found, using the process environment"),
    }

    let settings = config::from_env().map_err(|errors| {
        for problem in errors.problems() {
            tracing::error!(problem = %problem, "Invalid configuration");
        }
        BotError::from(errors)
    })?;
    tracing::info!(settings = %config::describe(&settings), "Configuration loaded");

    if cli.check_config {
        println!("Configuration OK");
        return Ok(());
    }

    let bot = Bot::new(settings.telegram_token.expose());
    let ctx = bootstrap(&settings, bot.clone())?;
    handlers::run(bot, ctx).await?;
    Ok(())
}
