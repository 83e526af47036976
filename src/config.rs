use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::catalog::dataset::DEFAULT_DATASET_URL;

pub const CATALOG_FILE: &str = "catalog.json";
pub const MATRIX_FILE: &str = "similarity.json";

/// Countries shown in the "top by country" section when nothing is configured.
pub const DEFAULT_TOP_COUNTRIES: [&str; 3] = ["South Korea", "Thailand", "Japan"];

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy; every
/// variable has a default so a bare checkout works after `matcha build`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding catalog.json and similarity.json (MATCHA_DATA_DIR)
    pub data_dir: PathBuf,
    /// Curated CSV source, URL or path (MATCHA_DATASET_SOURCE)
    pub dataset_source: String,
    /// Countries listed in the top-by-country section (MATCHA_TOP_COUNTRIES)
    pub top_countries: Vec<String>,
    /// How many recommendations to return when the caller doesn't say (MATCHA_DEFAULT_K)
    pub default_k: usize,
    /// Web server port (MATCHA_PORT)
    pub port: u16,
    /// Web server bind address (MATCHA_BIND)
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            dataset_source: DEFAULT_DATASET_URL.to_string(),
            top_countries: DEFAULT_TOP_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            default_k: 5,
            port: 3000,
            bind: "0.0.0.0".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let default_k = match env::var("MATCHA_DEFAULT_K") {
            Ok(raw) => parse_k(&raw).context("MATCHA_DEFAULT_K is invalid")?,
            Err(_) => defaults.default_k,
        };

        let port = match env::var("MATCHA_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("MATCHA_PORT is not a valid port: {raw}"))?,
            Err(_) => defaults.port,
        };

        let top_countries = env::var("MATCHA_TOP_COUNTRIES")
            .ok()
            .map(|raw| parse_countries(&raw))
            .filter(|c| !c.is_empty())
            .unwrap_or(defaults.top_countries);

        Ok(Self {
            data_dir: env::var("MATCHA_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            dataset_source: env::var("MATCHA_DATASET_SOURCE").unwrap_or(defaults.dataset_source),
            top_countries,
            default_k,
            port,
            bind: env::var("MATCHA_BIND").unwrap_or(defaults.bind),
        })
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(CATALOG_FILE)
    }

    pub fn matrix_path(&self) -> PathBuf {
        self.data_dir.join(MATRIX_FILE)
    }

    /// Check that both artifacts exist.
    /// Call this before any command that serves or queries recommendations.
    pub fn require_artifacts(&self) -> Result<()> {
        for path in [self.catalog_path(), self.matrix_path()] {
            if !path.exists() {
                anyhow::bail!(
                    "Artifact not found: {}\n\
                     Run `matcha build` first, or set MATCHA_DATA_DIR to the directory holding {} and {}.",
                    path.display(),
                    CATALOG_FILE,
                    MATRIX_FILE
                );
            }
        }
        Ok(())
    }
}

/// Parse a positive result count.
pub fn parse_k(raw: &str) -> Result<usize> {
    let k: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("not a number: {raw}"))?;
    if k == 0 {
        anyhow::bail!("must be at least 1");
    }
    Ok(k)
}

/// Split a comma-separated country list, dropping blanks.
pub fn parse_countries(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_k() {
        assert_eq!(parse_k(" 7 ").unwrap(), 7);
        assert!(parse_k("0").is_err());
        assert!(parse_k("five").is_err());
    }

    #[test]
    fn test_parse_countries() {
        assert_eq!(
            parse_countries("Thailand, ,Taiwan ,"),
            vec!["Thailand".to_string(), "Taiwan".to_string()]
        );
    }

    #[test]
    fn test_artifact_paths() {
        let config = Config {
            data_dir: PathBuf::from("/tmp/matcha"),
            ..Config::default()
        };
        assert_eq!(config.catalog_path(), PathBuf::from("/tmp/matcha/catalog.json"));
        assert_eq!(config.matrix_path(), PathBuf::from("/tmp/matcha/similarity.json"));
        assert!(config.require_artifacts().is_err());
    }
}
