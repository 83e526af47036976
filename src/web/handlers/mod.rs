// JSON API handlers, grouped by resource.

pub mod items;
pub mod picks;
pub mod recommend;
pub mod top;

use serde::Deserialize;

use crate::error::RecommendResult;
use crate::web::AppState;

/// `?k=` query shared by the ranking endpoints.
#[derive(Debug, Deserialize, Default)]
pub struct KQuery {
    pub k: Option<usize>,
}

impl KQuery {
    /// Explicit `k` or the configured default. Zero is passed through so the
    /// recommender rejects it as an invalid argument.
    pub fn resolve(&self, state: &AppState) -> usize {
        self.k.unwrap_or(state.config.default_k)
    }
}

pub type ApiResult<T> = RecommendResult<axum::Json<T>>;
