mod config;
mod provider;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // A missing .env is normal in deployment; the process env still applies.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env loaded");
    }

    let config = match config::RelayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid relay configuration; refusing to start");
            std::process::exit(1);
        }
    };

    let provider = match provider::TrelloClient::new(&config) {
        Ok(client) => {
            tracing::info!(base_url = client.base_url(), "provider client initialized");
            client
        }
        Err(e) => {
            tracing::error!(error = %e, "provider client init failed");
            std::process::exit(1);
        }
    };

    let state = state::AppState::new(Arc::new(provider));
    let app = routes::app(state);

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "trello-relay listening");
    axum::serve(listener, app).await.expect("server failed");
}
