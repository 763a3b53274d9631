mod api;
mod middleware;

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = coffeedrop_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = coffeedrop_db::PoolConfig::from_app_config(&config);
    let pool = coffeedrop_db::connect_pool(&config.database_url, pool_config).await?;
    coffeedrop_db::run_migrations(&pool).await?;

    let postcodes = coffeedrop_postcodes::PostcodesClient::new(
        &config.postcodes_endpoint,
        config.postcodes_timeout_secs,
    )?;

    let app = build_app(AppState { pool, postcodes });

    tracing::info!(addr = %config.bind_addr, env = %config.env, "starting coffeedrop server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
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
