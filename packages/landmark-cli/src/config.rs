use anyhow::{Context, Result};
use dotenvy::dotenv;
use landmark::ApiCredentials;
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: ApiCredentials,
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let llm_api_key = first_var(&["LLMAPIKEY", "GROQ_API_KEY"])
            .context("LLMAPIKEY (or GROQ_API_KEY) must be set")?;
        let image_api_token = first_var(&["REPLICATEAPIKEY", "REPLICATE_API_TOKEN"])
            .context("REPLICATEAPIKEY (or REPLICATE_API_TOKEN) must be set")?;

        Ok(Self {
            credentials: ApiCredentials::new(llm_api_key, image_api_token),
            output_dir: env::var("LANDMARK_OUTPUT_DIR").ok().map(PathBuf::from),
        })
    }
}

fn first_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
