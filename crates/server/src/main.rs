mod api;
mod config;
mod dto;
mod error;
mod fetch;
mod state;

use crate::{config::Args, fetch::Fetcher, state::AppState};
use anyhow::Context;
use clap::Parser;
use jeepcast::prelude::*;
use std::{sync::Arc, time::Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    info!("Starting server...");
    let fetcher = Fetcher::new(args.download_url.as_str());
    let mut downloaded = Vec::new();
    if fetcher
        .ensure(&args.model_id, &args.model_path)
        .await
        .context("Model artifact is unavailable")?
    {
        downloaded.push(args.model_path.as_path());
    }
    if fetcher
        .ensure(&args.encoder_id, &args.encoder_path)
        .await
        .context("Encoder artifact is unavailable")?
    {
        downloaded.push(args.encoder_path.as_path());
    }

    info!("Loading data...");
    let now = Instant::now();
    let predictor: Predictor = match Predictor::from_artifacts(&args.model_path, &args.encoder_path) {
        Ok(predictor) => predictor,
        Err(err) => {
            // Fresh downloads that do not load are dropped so the next start retries.
            fetch::discard(&downloaded).await;
            return Err(anyhow::Error::new(err).context("Failed to load model artifacts"));
        }
    };
    let data = dataset::Dataset::new(dataset::Config {
        stops_path: args.stops.clone(),
        ..Default::default()
    });
    let catalog = StopCatalog::load(&data).context("Failed to load stop catalog")?;
    let state = Arc::new(AppState::new(predictor, catalog));
    info!("Loading data took {:?}", now.elapsed());

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", args.host, args.port))?;
    info!("Listening on {}:{}", args.host, args.port);
    axum::serve(listener, app).await?;
    Ok(())
}
