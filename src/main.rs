use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod api;
mod catalog;
mod config;
mod engine;
mod error;
mod inference;
mod state;

use api::AppState;
use catalog::Catalog;
use config::Config;
use engine::PredictionEngine;
use inference::{LinearScoreModel, PredictorAdapter, RemotePredictor, ScorePredictor};
use state::Session;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    // The model is loaded once and shared read-only for the life of the process.
    let predictor: Arc<dyn ScorePredictor> = match &config.predictor_url {
        Some(url) => {
            let remote = RemotePredictor::new(url, config.predictor_timeout())?;
            info!("Using remote predictor at {}", remote.endpoint());
            Arc::new(remote)
        }
        None => Arc::new(
            LinearScoreModel::load(&config.model_path).context("Model load failed")?,
        ),
    };
    let adapter = PredictorAdapter::new(predictor);
    info!("Predictor ready: {}", adapter.name());

    let engine = PredictionEngine::new(adapter, Session::new());
    let app = api::router(AppState {
        engine,
        catalog: Arc::new(Catalog::build()),
    });

    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
