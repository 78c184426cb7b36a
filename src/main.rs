use pageview_dashboard::{config::SourceSettings, router, AppState, Settings};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let settings = Settings::from_env()?;
    if settings.source == SourceSettings::Missing {
        warn!("no firebase credentials found; dashboard will report missing configuration");
    }

    let state = AppState::from_settings(&settings)?;
    if let Some(source) = &state.source {
        info!("reading records from {}", source.describe());
    }

    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
