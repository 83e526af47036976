// Matcha: content-similarity recommendations for BL dramas
//
// This is the library root. The CLI (main.rs) and the web server both
// drive the same Recommender, built once from two read-only artifacts.

pub mod catalog;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod recommend;
pub mod similarity;
pub mod status;
pub mod text;

#[cfg(feature = "web")]
pub mod web;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Write `value` as pretty JSON, creating parent directories as needed.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    let json = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
