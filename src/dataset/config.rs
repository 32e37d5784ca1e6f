pub struct Config {
    pub stops_path: String,
    pub training_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stops_path: "data/updatedDataset.csv".into(),
            training_path: "data/expandedDataset.csv".into(),
        }
    }
}
