use std::path::PathBuf;

use anyhow::Result;
use dotenvy::dotenv;

pub const DEFAULT_INPUT_PATH: &str = "data/listings.xlsx";
pub const DEFAULT_SHEET_NAME: &str = "listings_raw";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_CHART_FILE: &str = "top_neighbourhoods.svg";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_path: PathBuf,
    pub sheet_name: String,
    pub output_dir: PathBuf,
    pub top_n: usize,
    pub chart_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            top_n: DEFAULT_TOP_N,
            chart_file: DEFAULT_CHART_FILE.to_string(),
        }
    }
}

impl Config {
    pub fn chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.chart_file)
    }

    /// Applies overrides from a variable lookup on top of the defaults.
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup("LISTINGS_INPUT") {
            config.input_path = PathBuf::from(path);
        }
        if let Some(sheet) = lookup("LISTINGS_SHEET") {
            config.sheet_name = sheet;
        }
        if let Some(dir) = lookup("LISTINGS_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(chart) = lookup("LISTINGS_CHART_FILE") {
            config.chart_file = chart;
        }
        if let Some(raw) = lookup("LISTINGS_TOP_N") {
            let top_n: usize = raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid LISTINGS_TOP_N '{}': {}", raw, e))?;
            if top_n == 0 {
                anyhow::bail!("LISTINGS_TOP_N must be at least 1");
            }
            config.top_n = top_n;
        }

        Ok(config)
    }
}

pub fn load_config() -> Result<Config> {
    // A missing .env file is fine, the defaults cover a plain run
    dotenv().ok();

    Config::from_lookup(|key| std::env::var(key).ok())
}
