// Dense item x item similarity matrix.
//
// Row i, column j is the cosine similarity of catalog item i to item j, with
// rows and columns in catalog order. Matrices built here are symmetric by
// construction; matrices loaded from disk are only required to be square,
// finite and within [0, 1]. Ranking always reads the query item's row.
//
// The artifact is plain JSON so loading it can never execute anything.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::cosine_similarity;
use crate::catalog::{Catalog, ItemId};
use crate::error::LoadError;
use crate::text::tokenize::Analyzer;
use crate::text::vectorize::CountVectorizer;

/// Current on-disk artifact version for `similarity.json`.
pub const MATRIX_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct MatrixFile {
    version: u32,
    ids: Vec<ItemId>,
    rows: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    ids: Vec<ItemId>,
    /// Row-major, `ids.len()` squared entries
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build from explicit rows, validating shape and score range.
    pub fn from_rows(ids: Vec<ItemId>, rows: Vec<Vec<f64>>) -> Result<Self, LoadError> {
        let n = ids.len();
        if rows.len() != n {
            return Err(LoadError::NotSquare {
                ids: n,
                row: rows.len(),
                len: rows.len(),
            });
        }

        let mut scores = Vec::with_capacity(n * n);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(LoadError::NotSquare {
                    ids: n,
                    row: r,
                    len: row.len(),
                });
            }
            for (c, value) in row.into_iter().enumerate() {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(LoadError::InvalidScore { row: r, col: c, value });
                }
                scores.push(value);
            }
        }

        Ok(Self { ids, scores })
    }

    /// Vectorize every item's feature text and compute all pairwise cosines.
    ///
    /// The vocabulary is capped at the catalog size. The result is
    /// deterministic for identical catalogs.
    pub fn build(catalog: &Catalog, analyzer: &dyn Analyzer) -> Self {
        let documents: Vec<&str> = catalog
            .items()
            .iter()
            .map(|item| item.feature_text.as_str())
            .collect();

        let (vocab, vectors) = CountVectorizer::new(analyzer)
            .with_max_features(catalog.len())
            .fit_transform(&documents);

        let n = vectors.len();
        let mut scores = vec![0.0; n * n];
        for i in 0..n {
            for j in i..n {
                let s = cosine_similarity(&vectors[i], &vectors[j]);
                scores[i * n + j] = s;
                scores[j * n + i] = s;
            }
        }

        info!(
            items = n,
            vocabulary = vocab.len(),
            "Built similarity matrix"
        );

        Self {
            ids: catalog.items().iter().map(|item| item.id.clone()).collect(),
            scores,
        }
    }

    /// Load `similarity.json` written by `SimilarityMatrix::save`.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file: MatrixFile =
            serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        if file.version != MATRIX_VERSION {
            return Err(LoadError::UnsupportedVersion {
                path: path.display().to_string(),
                found: file.version,
            });
        }
        Self::from_rows(file.ids, file.rows)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let n = self.len();
        let rows = (0..n).map(|i| self.row(i).to_vec()).collect();
        let file = MatrixFile {
            version: MATRIX_VERSION,
            ids: self.ids.clone(),
            rows,
        };
        crate::write_json(path, &file)
    }

    /// Check that this matrix lines up with `catalog` position by position.
    pub fn check_against(&self, catalog: &Catalog) -> Result<(), LoadError> {
        if self.len() != catalog.len() {
            return Err(LoadError::DimensionMismatch {
                matrix: self.len(),
                catalog: catalog.len(),
            });
        }
        for (position, (id, item)) in self.ids.iter().zip(catalog.items()).enumerate() {
            if *id != item.id {
                return Err(LoadError::IdMismatch {
                    position,
                    matrix: id.to_string(),
                    catalog: item.id.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    /// Scores of item `i` against every item, in catalog order.
    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.len();
        &self.scores[i * n..(i + 1) * n]
    }

    pub fn score(&self, i: usize, j: usize) -> f64 {
        self.scores[i * self.len() + j]
    }

    /// True when `score(i, j)` and `score(j, i)` never differ by more than `tolerance`.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.len();
        (0..n).all(|i| (i + 1..n).all(|j| (self.score(i, j) - self.score(j, i)).abs() <= tolerance))
    }
}
