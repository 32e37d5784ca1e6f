use anyhow::Context;
use clap::Parser;
use jeepcast::{
    dataset::{self, Dataset},
    model::TreeParams,
    training,
};
use std::{path::PathBuf, time::Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jeepcast-train", about = "Fit and save the passenger volume model")]
struct Args {
    #[arg(long, env = "JEEPCAST_TRAINING_DATA", default_value = "data/expandedDataset.csv")]
    data: String,

    #[arg(long, env = "JEEPCAST_MODEL_PATH", default_value = "model/pujPassModel.json")]
    model_path: PathBuf,

    #[arg(long, env = "JEEPCAST_ENCODER_PATH", default_value = "model/encoders.json")]
    encoder_path: PathBuf,

    #[arg(long, default_value_t = 12)]
    max_depth: usize,

    #[arg(long, default_value_t = 2)]
    min_samples_split: usize,

    #[arg(long, default_value_t = 1)]
    min_samples_leaf: usize,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    info!("Training model...");
    let now = Instant::now();
    let data = Dataset::new(dataset::Config {
        training_path: args.data.clone(),
        ..Default::default()
    });
    let params = TreeParams {
        max_depth: args.max_depth,
        min_samples_split: args.min_samples_split,
        min_samples_leaf: args.min_samples_leaf,
    };
    let report = training::train_and_save(&data, &args.model_path, &args.encoder_path, params)
        .context("Training failed")?;
    info!(
        "Training finished in {:?}: {} rows, {} nodes, depth {}, MAE {:.3}, R2 {:.3}",
        now.elapsed(),
        report.rows,
        report.nodes,
        report.depth,
        report.mean_absolute_error,
        report.r_squared
    );
    Ok(())
}
