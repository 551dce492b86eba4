use std::env;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use relatoria_api::config::ApiConfig;
use relatoria_api::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // A missing .env is normal outside local development.
    dotenv::dotenv().ok();

    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ApiConfig::from_env()?;
    let state = AppState::connect(&config)?;
    let app = relatoria_api::router(state);

    if env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
        tracing::info!(env = %config.environment, "starting lambda runtime");
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, env = %config.environment, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
