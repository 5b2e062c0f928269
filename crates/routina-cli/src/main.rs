use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use routina_application::WidgetSession;
use routina_infrastructure::{RoutinaPaths, catalog_source_for};
use routina_interaction::relay_from_config;

mod commands;
mod helper;
mod render;
mod repl;
mod settings;

use render::TerminalRenderSink;

#[derive(Parser, Debug)]
#[command(name = "routina")]
#[command(about = "Browse a product catalog, build a selection and ask an advisor for a routine", long_about = None)]
#[command(version)]
pub struct Args {
    /// Config file (default: ~/.config/routina/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Catalog JSON: file path or http(s) URL
    #[arg(long)]
    pub catalog: Option<String>,

    /// Chat relay endpoint
    #[arg(long)]
    pub relay_url: Option<String>,

    /// Model name sent to the relay
    #[arg(long)]
    pub model: Option<String>,

    /// Directory for saved state and logs
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let paths = RoutinaPaths::new(args.data_dir.clone());

    let _guard = init_logging(&paths.log_dir()?)?;

    let config = settings::resolve_config(&args, &paths)?;
    let store = settings::open_store(settings::storage_path(&config, &paths)?);
    info!(
        catalog = %config.catalog.source,
        relay = config.relay.endpoint.as_deref().unwrap_or("<none>"),
        model = %config.relay.model,
        "starting routina"
    );

    let mut session = WidgetSession::new(
        catalog_source_for(&config.catalog.source),
        relay_from_config(&config.relay),
        store,
        Arc::new(TerminalRenderSink::new()),
    );
    session.start().await;

    repl::run(&mut session).await
}

/// Logs go to a daily file under the data directory; the terminal is
/// reserved for the REPL. `RUST_LOG` overrides the default filter.
fn init_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::daily(log_dir, "routina.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("routina=info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
