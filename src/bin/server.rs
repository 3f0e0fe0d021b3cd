use anyhow::Context;
use clap::Parser;
use polls::{config, create_app, db, run_migrations};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the tracing subscriber
///
/// Logs go to stdout in human-readable form and, when a data directory is
/// available, to a daily rolling JSON file. The returned guard must be held
/// until shutdown so buffered file output is flushed.
fn init_logging(debug: bool) -> Option<WorkerGuard> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let mut file_error = None;
    let (file_layer, guard) = match config::get_data_dir_path() {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("polls")
                .filename_suffix("log")
                .build(dir.join("logs"));

            match appender {
                Ok(appender) => {
                    let (writer, guard) = tracing_appender::non_blocking(appender);
                    (Some(fmt::layer().json().with_writer(writer)), Some(guard))
                }
                Err(e) => {
                    file_error = Some(e.to_string());
                    (None, None)
                }
            }
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        warn!("File logging disabled: {}", e);
    }

    guard
}

/// Resolves once `signal` fires; never resolves if listening for it failed
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!("Failed to listen for Ctrl+C, graceful shutdown disabled: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let args = config::CliArgs::parse();
    let _guard = init_logging(args.debug);

    let config = config::get_config(&args);

    let pool = db::init_pool(&config.database_url)?;
    {
        let mut conn = pool.get().context("Failed to get connection for migrations")?;
        run_migrations(&mut conn)?;
    }

    let app = create_app(Arc::new(pool));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;

    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
