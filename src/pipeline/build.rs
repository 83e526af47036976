// Offline artifact build: curated CSV -> catalog.json + similarity.json.
//
// Steps:
//   1. Fetch the CSV (URL or local file)
//   2. Clean rows into catalog items (defaults, dedupe, tag text)
//   3. Tokenize, drop stop words, stem, count-vectorize
//   4. Pairwise cosine into a dense matrix
//   5. Write both artifacts into the data directory
//
// The serving path never runs this; it only loads what this writes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::catalog::dataset::{self, DatasetSource};
use crate::catalog::Catalog;
use crate::config::{CATALOG_FILE, MATRIX_FILE};
use crate::similarity::SimilarityMatrix;
use crate::text::tokenize::{Analyzer, EnglishAnalyzer};

/// What a build produced, for display.
#[derive(Debug)]
pub struct BuildSummary {
    pub items: usize,
    pub countries: Vec<String>,
    pub catalog_path: PathBuf,
    pub matrix_path: PathBuf,
}

/// Parse CSV text and compute the matrix, without touching the filesystem.
pub fn build_artifacts(csv_text: &str, analyzer: &dyn Analyzer) -> Result<(Catalog, SimilarityMatrix)> {
    let items = dataset::parse(csv_text.as_bytes()).context("Failed to parse dataset CSV")?;
    let catalog = Catalog::new(items).context("Dataset produced an invalid catalog")?;
    let matrix = SimilarityMatrix::build(&catalog, analyzer);
    Ok((catalog, matrix))
}

/// Fetch, build and write both artifacts into `data_dir`.
pub async fn run(source: &DatasetSource, data_dir: &Path) -> Result<BuildSummary> {
    let csv_text = dataset::fetch(source).await?;
    info!(source = %source, bytes = csv_text.len(), "Dataset fetched");

    let analyzer = EnglishAnalyzer::default();
    let (catalog, matrix) = build_artifacts(&csv_text, &analyzer)?;

    let catalog_path = data_dir.join(CATALOG_FILE);
    let matrix_path = data_dir.join(MATRIX_FILE);
    catalog.save(&catalog_path)?;
    matrix.save(&matrix_path)?;

    info!(
        items = catalog.len(),
        catalog = %catalog_path.display(),
        matrix = %matrix_path.display(),
        "Artifacts written"
    );

    Ok(BuildSummary {
        items: catalog.len(),
        countries: catalog.countries().into_iter().map(str::to_string).collect(),
        catalog_path,
        matrix_path,
    })
}
