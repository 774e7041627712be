use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::matching::relevance::DEFAULT_RELEVANCE_THRESHOLD;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON catalog to load at startup. `None` uses the bundled catalog.
    pub catalog_path: Option<PathBuf>,
    /// `is_relevant` cut-off for the skill relevance scorer.
    pub relevance_threshold: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let relevance_threshold = match std::env::var("RELEVANCE_THRESHOLD") {
            Ok(raw) => parse_threshold(&raw)?,
            Err(_) => DEFAULT_RELEVANCE_THRESHOLD,
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            catalog_path: std::env::var_os("CATALOG_PATH").map(PathBuf::from),
            relevance_threshold,
        })
    }
}

fn parse_threshold(raw: &str) -> Result<f64> {
    let value = raw
        .trim()
        .parse::<f64>()
        .with_context(|| format!("RELEVANCE_THRESHOLD '{raw}' is not a number"))?;
    if !(0.0..=1.0).contains(&value) {
        bail!("RELEVANCE_THRESHOLD must be within 0-1, got {value}");
    }
    Ok(value)
}
