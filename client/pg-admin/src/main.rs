//! pg-admin - PG Admin account client
//!
//! # Examples
//!
//! ```bash
//! # Create an account
//! pg-admin sign-up --name "Jane Doe" --email jane@example.com --password secret1
//!
//! # Sign in and show the dashboard
//! pg-admin sign-in --email jane@example.com --password secret1
//!
//! # Dashboard for the stored session
//! pg-admin home
//! ```

use pg_admin::{AppResult, Cli, logger, runner};
use pg_backend::SupabaseBackend;
use pg_config::Config;
use pg_session::{RetryPolicy, SessionStore};

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::info;
use tokio::sync::broadcast;

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<bool> {
    let config = match cli.config_dir {
        Some(ref dir) => Config::load_from(dir)?,
        None => Config::load()?,
    };
    config.validate()?;

    let log_file = config.log_path();
    if let Some(dir) = log_file.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(dir)?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file, config.logging.colored)?;

    info!("Starting pg-admin v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let backend = Arc::new(SupabaseBackend::from_config(&config)?);

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let refresher = config.session.auto_refresh.then(|| {
        backend.spawn_auto_refresh(
            Duration::from_secs(config.session.refresh_interval_secs),
            shutdown_rx,
        )
    });

    let store = SessionStore::new(backend.clone(), RetryPolicy::from(&config.profile_fetch));

    let mut stdout = std::io::stdout();
    let result = runner::run(cli.command, &store, &mut stdout).await;

    store.teardown();
    let _ = shutdown_tx.send(());
    if let Some(handle) = refresher {
        let _ = handle.await;
    }

    info!("pg-admin finished");
    result
}
