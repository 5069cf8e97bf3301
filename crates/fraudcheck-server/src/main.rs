mod api;
mod middleware;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use fraudcheck_core::{FeedClient, FraudCache};

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = fraudcheck_core::load_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // One shared cache per process, owned here and handed to the handlers.
    // The first query past the staleness gate performs the first fetch.
    let feed = FeedClient::new(&config.feed_url, config.request_timeout_secs)?;
    let cache = Arc::new(FraudCache::new(feed, config.refresh_interval));

    let app = build_app(AppState { cache });

    tracing::info!(addr = %config.bind_addr, "fraudcheck server listening");
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
