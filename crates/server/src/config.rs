use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "jeepcast-server", about = "Jeepney passenger prediction API")]
pub struct Args {
    #[arg(long, env = "JEEPCAST_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "JEEPCAST_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Csv with Stop, Latitude and Longitude columns
    #[arg(long, env = "JEEPCAST_STOPS", default_value = "data/updatedDataset.csv")]
    pub stops: String,

    #[arg(long, env = "JEEPCAST_MODEL_PATH", default_value = "model/pujPassModel.json")]
    pub model_path: PathBuf,

    #[arg(long, env = "JEEPCAST_ENCODER_PATH", default_value = "model/encoders.json")]
    pub encoder_path: PathBuf,

    /// Remote file id, only used when the model file is missing
    #[arg(long, env = "JEEPCAST_MODEL_ID", default_value = "1mXS5wishkGqjstxVdKUadkpDuKg6TQ6G")]
    pub model_id: String,

    /// Remote file id, only used when the encoder file is missing
    #[arg(long, env = "JEEPCAST_ENCODER_ID", default_value = "1VhQw6AQWZ-_vRF_f9piD4ELsahsyeAWO")]
    pub encoder_id: String,

    #[arg(long, env = "JEEPCAST_DOWNLOAD_URL", default_value = "https://drive.google.com/uc")]
    pub download_url: String,
}
