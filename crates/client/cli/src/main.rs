//! Demo host: a listen-server session and a remote replica sharing one
//! replication link.
mod config;
mod demo;

use std::sync::Arc;

use anyhow::{Context, Result};
use config::CliConfig;
use inventory_content::ContentFactory;
use inventory_core::ItemOracle;
use inventory_runtime::ItemRegistry;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(&config)?;

    let factory = ContentFactory::new(config.data_dir());
    let inventory_config = factory
        .load_config()
        .with_context(|| format!("loading config from {}", factory.data_dir().display()))?;
    let definitions = factory
        .load_items()
        .with_context(|| format!("loading items from {}", factory.data_dir().display()))?;
    let items: Arc<dyn ItemOracle> = Arc::new(ItemRegistry::from_definitions(definitions)?);

    demo::run(&config, inventory_config, items).await
}

/// Setup logging to a per-session file.
///
/// The returned guard flushes the writer when dropped; keep it alive for
/// the whole process.
fn setup_logging(config: &CliConfig) -> Result<WorkerGuard> {
    use std::time::{SystemTime, UNIX_EPOCH};

    // Create session ID if not provided
    let session_id = match &config.session_id {
        Some(id) => id.clone(),
        None => {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default();
            format!("session_{}", timestamp)
        }
    };

    let session_log_dir = config.log_dir().join(&session_id);
    std::fs::create_dir_all(&session_log_dir)
        .with_context(|| format!("creating log directory {}", session_log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "inventory.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!(session = %session_id, "logging initialized");
    tracing::info!("Log file: {}/inventory.log", session_log_dir.display());

    Ok(guard)
}
