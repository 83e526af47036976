// Similarity recommender: top-K lookups over the loaded artifacts.
//
// The recommender owns the catalog and the matrix and never mutates either
// after construction. Share it across request handlers behind an `Arc`.
//
// Ranking rules:
//   - the query item is always excluded explicitly, whatever its diagonal
//     score happens to be
//   - candidates are stable-sorted by score descending, so equal scores keep
//     catalog order
//   - results are truncated to min(k, catalog_size - 1)

pub mod picks;

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{Catalog, Item, ItemId};
use crate::error::{LoadError, RecommendError, RecommendResult};
use crate::similarity::SimilarityMatrix;

use self::picks::{FeaturedPick, FEATURED_PICKS};

/// One recommended item with its similarity to the query item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredItem<'a> {
    pub item: &'a Item,
    pub score: f64,
}

pub struct Recommender {
    catalog: Catalog,
    matrix: SimilarityMatrix,
}

impl Recommender {
    /// Pair a catalog with its matrix, checking they line up.
    pub fn new(catalog: Catalog, matrix: SimilarityMatrix) -> Result<Self, LoadError> {
        matrix.check_against(&catalog)?;
        Ok(Self { catalog, matrix })
    }

    /// Load both artifacts from disk. Any failure is fatal: nothing is served
    /// from a partially loaded state.
    pub fn load(catalog_path: &Path, matrix_path: &Path) -> Result<Self, LoadError> {
        let catalog = Catalog::load(catalog_path)?;
        let matrix = SimilarityMatrix::load(matrix_path)?;
        let recommender = Self::new(catalog, matrix)?;
        info!(
            items = recommender.catalog.len(),
            symmetric = recommender.matrix.is_symmetric(1e-9),
            "Loaded recommendation artifacts"
        );
        Ok(recommender)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    /// The `k` items most similar to `item_id`, best first.
    pub fn recommend(&self, item_id: &ItemId, k: usize) -> RecommendResult<Vec<&Item>> {
        Ok(self
            .recommend_scored(item_id, k)?
            .into_iter()
            .map(|scored| scored.item)
            .collect())
    }

    /// Same ranking as `recommend`, keeping each item's score.
    pub fn recommend_scored(&self, item_id: &ItemId, k: usize) -> RecommendResult<Vec<ScoredItem<'_>>> {
        ensure_positive(k)?;
        let query = self
            .catalog
            .index_of(item_id)
            .ok_or_else(|| RecommendError::NotFound(item_id.to_string()))?;

        let mut candidates: Vec<(usize, f64)> = self
            .matrix
            .row(query)
            .iter()
            .copied()
            .enumerate()
            .filter(|&(idx, _)| idx != query)
            .collect();

        // sort_by is stable: equal scores stay in catalog order.
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        candidates.truncate(k);

        debug!(item = %item_id, k, returned = candidates.len(), "Ranked similar items");

        Ok(candidates
            .into_iter()
            .filter_map(|(idx, score)| {
                self.catalog
                    .get(idx)
                    .map(|item| ScoredItem { item, score })
            })
            .collect())
    }

    /// Resolve a title (case-insensitive) and recommend from it.
    pub fn recommend_by_title(&self, title: &str, k: usize) -> RecommendResult<Vec<ScoredItem<'_>>> {
        ensure_positive(k)?;
        let item = self
            .catalog
            .by_title(title)
            .ok_or_else(|| RecommendError::NotFound(title.trim().to_string()))?;
        self.recommend_scored(&item.id, k)
    }

    /// Highest-rated items from one country.
    ///
    /// Country matching is case-insensitive on the full name. Items without
    /// a numeric rating are left out; equal ratings keep catalog order. An
    /// unknown country yields an empty list.
    pub fn top_by_country(&self, country: &str, k: usize) -> RecommendResult<Vec<&Item>> {
        ensure_positive(k)?;
        let wanted = country.trim().to_lowercase();

        let mut rated: Vec<(&Item, f64)> = self
            .catalog
            .items()
            .iter()
            .filter(|item| item.country.trim().to_lowercase() == wanted)
            .filter_map(|item| item.rating.map(|r| (item, r)))
            .collect();

        rated.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(rated.into_iter().take(k).map(|(item, _)| item).collect())
    }

    /// The static "watch next" picks, each resolved against the catalog.
    pub fn featured_picks(&self) -> Vec<FeaturedPick<'_>> {
        FEATURED_PICKS
            .iter()
            .map(|pick| FeaturedPick {
                title: pick.title,
                image_url: pick.image_url,
                item: self.catalog.by_title(pick.title),
            })
            .collect()
    }
}

fn ensure_positive(k: usize) -> RecommendResult<()> {
    if k == 0 {
        return Err(RecommendError::InvalidArgument(
            "k must be at least 1".to_string(),
        ));
    }
    Ok(())
}
