// Curated dataset loading and preprocessing.
//
// The curated table is a CSV export (a Google Sheets export by default, or a
// local file). Rows are cleaned into catalog items:
//   - missing Episodes / Duration / Rating / Release Date get fixed defaults
//   - duplicate titles are dropped, first occurrence wins
//   - hyphens in Themes become spaces
//   - feature text = lowercase("{Summary} {Genres} {Themes}")
//
// Parsing is pure (any `Read`); fetching is a thin async wrapper so tests
// never touch the network.

use std::collections::HashSet;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::rating::extract_numeric_rating;
use super::{assign_ids, Item};

/// Published CSV export of the curated drama sheet.
pub const DEFAULT_DATASET_URL: &str =
    "https://docs.google.com/spreadsheets/d/1-bHukazIbC7jwghhwUuQO50rtEqGA27JgLfl5jK03jk/export?format=csv";

pub const DEFAULT_EPISODES: u32 = 12;
pub const DEFAULT_DURATION: &str = "45 min";
pub const DEFAULT_RATING: &str = "5.7/10 (MDL)";
pub const DEFAULT_RELEASE_DATE: &str = "2021-01-01";

const REQUIRED_COLUMNS: [&str; 2] = ["Title", "Country"];

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("dataset has no usable rows")]
    Empty,
}

/// Where the curated CSV comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetSource {
    Url(String),
    File(PathBuf),
}

impl DatasetSource {
    /// `http://` and `https://` strings are URLs; anything else is a path.
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Raw CSV row. Every column except Title is optional in practice.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Rating", default)]
    rating: Option<String>,
    #[serde(rename = "Summary", default)]
    summary: Option<String>,
    #[serde(rename = "Genres", default)]
    genres: Option<String>,
    #[serde(rename = "Themes", default)]
    themes: Option<String>,
    #[serde(rename = "Episodes", default)]
    episodes: Option<String>,
    #[serde(rename = "Duration", default)]
    duration: Option<String>,
    #[serde(rename = "Release Date", default)]
    release_date: Option<String>,
    #[serde(rename = "Poster_URL", default)]
    poster_url: Option<String>,
}

/// Read the dataset text from a URL or a local file.
pub async fn fetch(source: &DatasetSource) -> anyhow::Result<String> {
    match source {
        DatasetSource::Url(url) => {
            info!(url = %url, "Downloading dataset");
            let client = reqwest::Client::builder()
                .user_agent("matcha/0.1 (dataset-build)")
                .build()
                .context("Failed to build HTTP client")?;
            let response = client
                .get(url)
                .send()
                .await
                .with_context(|| format!("Dataset request failed: {url}"))?;
            if !response.status().is_success() {
                let status = response.status();
                anyhow::bail!("Dataset download from {url} returned {status}");
            }
            response
                .text()
                .await
                .with_context(|| format!("Failed to read dataset body from {url}"))
        }
        DatasetSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read dataset file {}", path.display())),
    }
}

/// Parse and clean a curated CSV into catalog items, in catalog order.
pub fn parse<R: Read>(reader: R) -> Result<Vec<Item>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn(column));
        }
    }

    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut cleaned = Vec::new();
    let mut skipped = 0usize;

    for (line, record) in csv_reader.deserialize::<RawRow>().enumerate() {
        let row = record?;
        let Some(title) = non_empty(row.title.clone()) else {
            skipped += 1;
            debug!(line = line + 2, "Skipping row without a title");
            continue;
        };
        if !seen_titles.insert(title.clone()) {
            debug!(title = %title, "Dropping duplicate title");
            continue;
        }
        cleaned.push(clean_row(title, row));
    }

    if skipped > 0 {
        warn!(skipped, "Rows without a title were skipped");
    }
    if cleaned.is_empty() {
        return Err(DatasetError::Empty);
    }

    let ids = assign_ids(cleaned.iter().map(|c| c.title.as_str()));
    let items = cleaned
        .into_iter()
        .zip(ids)
        .map(|(c, id)| Item {
            id,
            title: c.title,
            country: c.country,
            rating: extract_numeric_rating(&c.rating_label),
            rating_label: c.rating_label,
            episodes: c.episodes,
            duration: c.duration,
            release_date: c.release_date,
            poster_url: c.poster_url,
            feature_text: c.feature_text,
        })
        .collect::<Vec<_>>();

    info!(items = items.len(), "Parsed curated dataset");
    Ok(items)
}

struct CleanRow {
    title: String,
    country: String,
    rating_label: String,
    episodes: u32,
    duration: String,
    release_date: String,
    poster_url: Option<String>,
    feature_text: String,
}

fn clean_row(title: String, row: RawRow) -> CleanRow {
    let themes = non_empty(row.themes).map(|t| t.replace('-', " "));
    let tags = [non_empty(row.summary), non_empty(row.genres), themes]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    CleanRow {
        title,
        country: non_empty(row.country).unwrap_or_default(),
        rating_label: non_empty(row.rating).unwrap_or_else(|| DEFAULT_RATING.to_string()),
        episodes: non_empty(row.episodes)
            .and_then(|e| parse_episodes(&e))
            .unwrap_or(DEFAULT_EPISODES),
        duration: non_empty(row.duration).unwrap_or_else(|| DEFAULT_DURATION.to_string()),
        release_date: non_empty(row.release_date)
            .unwrap_or_else(|| DEFAULT_RELEASE_DATE.to_string()),
        poster_url: non_empty(row.poster_url),
        feature_text: tags,
    }
}

/// Spreadsheet exports sometimes write counts as floats ("16.0").
fn parse_episodes(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.round() as u32)
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
