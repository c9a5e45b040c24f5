//! Rumbo server binary.
//!
//! Composition root: builds the store, hub, and background tasks, then
//! serves HTTP until Ctrl-C. On shutdown the watch signal stops the hub
//! consumer, sweeper, and simulator, and the server finishes in-flight
//! requests before exiting.

use std::sync::Arc;
use std::time::Duration;

use rumbo_server::config::AppConfig;
use rumbo_server::hub::{Hub, run_hub};
use rumbo_server::server::start_server;
use rumbo_server::state::AppState;
use rumbo_store::{Store, run_sweeper};
use rumbo_traffic::{SystemTime, run_simulator};
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("rumbo-server starting");

    let config = AppConfig::load()?;
    info!(
        host = %config.host,
        port = config.port,
        simulator_period_secs = config.simulator_period_secs,
        sweep_period_secs = config.sweep_period_secs,
        "configuration loaded"
    );

    let store = Arc::new(Store::new());
    store.seed_sample_data().await;

    let (hub, hub_events) = Hub::new(Arc::clone(&store));
    let state = Arc::new(AppState::new(Arc::clone(&store), Arc::clone(&hub)));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let hub_task = tokio::spawn(run_hub(
        Arc::clone(&hub),
        hub_events,
        shutdown_rx.clone(),
    ));
    let sweeper_task = tokio::spawn(run_sweeper(
        Arc::clone(&store),
        Duration::from_secs(config.sweep_period_secs),
        shutdown_rx.clone(),
    ));
    let simulator_task = tokio::spawn(run_simulator(
        Arc::clone(&store),
        Arc::new(SystemTime),
        Duration::from_secs(config.simulator_period_secs),
        shutdown_rx.clone(),
    ));

    // Flip the shutdown signal on Ctrl-C so every background task and the
    // server wind down together.
    let ctrl_c_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received; shutting down");
            let _ = ctrl_c_tx.send(true);
        }
    });

    start_server(&config, state, shutdown_rx).await?;

    // The server has drained; make sure the background tasks stop too.
    let _ = shutdown_tx.send(true);
    let _ = hub_task.await;
    let _ = sweeper_task.await;
    let _ = simulator_task.await;

    info!("rumbo-server stopped");
    Ok(())
}
