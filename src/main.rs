use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use ssrf_sheriff::config::{AppState, Config, DEFAULT_CONFIG_PATH};
use ssrf_sheriff::error::ConfigError;
use ssrf_sheriff::{logger, server};

/// How long queued alerts may keep draining after shutdown
const ALERT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional first argument: config file path without extension
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path)?;

    logger::init(&cfg).map_err(|source| ConfigError::LogFile {
        path: cfg.log_file().unwrap_or_default().to_string(),
        source,
    })?;

    // Create Tokio runtime, sized by the workers setting when present
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;
    logger::log_server_start(&listener.local_addr()?, &cfg);

    let (state, alert_worker) = AppState::from_config(cfg).await?;
    let state = Arc::new(state);

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    server::start_server_loop(listener, Arc::clone(&state), shutdown).await?;

    // Open keep-alive connections still hold the state, so close the queue
    // explicitly and flush alerts that were already accepted.
    drop(state);
    if let Some(worker) = alert_worker {
        if !worker.drain(ALERT_DRAIN_TIMEOUT).await {
            logger::warn("Alert worker did not drain before shutdown", &[]);
        }
    }
    Ok(())
}
