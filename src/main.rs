//! Relationship Probability Predictor — Binary Entrypoint
//! Loads both model artifacts, then boots the Axum HTTP server. A missing
//! or corrupt artifact halts the process before the listener binds, so the
//! prediction UI never becomes interactive without working models.

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use relationship_predictor::api::{self, AppState};
use relationship_predictor::blend::BlendedPredictor;
use relationship_predictor::config::PredictorConfig;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("relationship_predictor=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = PredictorConfig::load()?;

    // Both artifacts load once here and stay read-only for the process
    // lifetime. Any failure is fatal and names the attempted path.
    let predictor = match BlendedPredictor::load(&config) {
        Ok(p) => p,
        Err(e) => {
            error!(path = %e.path().display(), error = %e, "startup failed");
            return Err(e.into());
        }
    };

    let state = AppState { predictor };
    let router = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("binding {}", config.server.bind))?;
    info!(addr = %config.server.bind, "serving");
    axum::serve(listener, router).await?;

    Ok(())
}
