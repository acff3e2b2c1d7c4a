use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use stromvarsler::check::{CheckOutcome, run_check};
use stromvarsler::cli::{Args, Command};
use stromvarsler::logging::init_logging;
use stromvarsler::nordpool::{NordpoolClient, local_today};
use stromvarsler::pushover::PushoverNotifier;
use stromvarsler::web::{AppState, serve};
use stromvarsler::{Config, ENV_KEYS};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    init_logging(&config.logging).map_err(|e| anyhow::anyhow!("Failed to init logging: {}", e))?;

    info!(
        "Strømvarsler {} starting - area: {}, thresholds: {:.2}/{:.2}",
        env!("APP_VERSION"),
        config.area,
        config.thresholds.low,
        config.thresholds.high
    );
    for key in ENV_KEYS {
        if std::env::var_os(key).is_some() {
            debug!("Environment override present: {}", key);
        }
    }

    let source = NordpoolClient::new(&config.provider)?;

    match args.command {
        Command::Check => {
            let notifier = PushoverNotifier::new(&config.pushover)?;
            if !notifier.is_enabled() {
                warn!("PUSHOVER_TOKEN/PUSHOVER_USER not set; alerts will only be logged");
            }
            let today = local_today(config.tz()?);
            match run_check(&config, &source, &notifier, today).await {
                CheckOutcome::Failed(message) => Err(anyhow::anyhow!("Check failed: {}", message)),
                outcome => {
                    debug!("Check finished: {:?}", outcome);
                    Ok(())
                }
            }
        }
        Command::Serve(serve_args) => {
            let host = serve_args.host.unwrap_or_else(|| config.web.host.clone());
            let port = serve_args.port.unwrap_or(config.web.port);
            let state = AppState::new(config, Arc::new(source));
            serve(state, &host, port).await
        }
    }
}
