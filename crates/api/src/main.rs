use anyhow::Context;

use tsbank_api::config::ApiConfig;
use tsbank_observability::ObservabilityConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    let config = ApiConfig::from_env().context("invalid configuration")?;

    tsbank_observability::init_with(&ObservabilityConfig {
        format: config.log_format,
        ..ObservabilityConfig::default()
    });

    let app = tsbank_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        accounts = config.seed_accounts.len(),
        "listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
