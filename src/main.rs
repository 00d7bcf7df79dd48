use anyhow::Context;
use tracing_subscriber::EnvFilter;

use paperdesk::config;
use paperdesk::server::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up AUTH_PROVIDER_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("paperdesk=info,tower_http=info")),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting paperdesk in {:?} mode", config.environment);

    let state = AppState::from_config(config).context("failed to set up session oracle")?;
    let app = app(state, &config.security);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("paperdesk listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
