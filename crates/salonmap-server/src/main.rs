mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use salonmap_core::Region;
use salonmap_locator::{OverpassClient, QueryPipeline};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = salonmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let region = match &config.region_path {
        Some(path) => salonmap_core::load_region(path)?,
        None => Region::niagara(),
    };
    let client = OverpassClient::from_config(&config)?;
    let pipeline = QueryPipeline::new(
        client,
        Duration::from_secs(config.cache_ttl_secs),
        region,
    );

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        overpass_url = %config.overpass_url,
        area = %config.overpass_area,
        region = pipeline.region().name(),
        "starting salonmap-server"
    );

    let app = build_app(AppState {
        pipeline: Arc::new(pipeline),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
