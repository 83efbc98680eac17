use std::sync::Arc;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use vital_track::{AppState, Config, FileStorage, HealthData, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    fs::create_dir_all(&config.data_dir).await?;
    info!(data_dir = %config.data_dir.display(), "opening stores");

    let mut data = HealthData::open(Arc::new(FileStorage::new(&config.data_dir)));
    data.entries.subscribe(|record| {
        info!(
            date = %record.date,
            steps = record.steps,
            water = record.water_glasses,
            sleep = record.sleep_hours,
            "daily record saved"
        );
    });
    data.goals.subscribe(|goals| info!(?goals, "goals saved"));

    let app = router(AppState::new(data));
    let addr = config.addr();

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
