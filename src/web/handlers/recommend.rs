// Similarity recommendations.
//
// GET /api/items/{id}/similar?k=5   by item id
// GET /api/recommend?title=...&k=5  by title, case-insensitive
//
// k defaults to MATCHA_DEFAULT_K; k=0 is a 400, an unknown item a 404.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::items::ItemSummary;
use super::{ApiResult, KQuery};
use crate::catalog::{Item, ItemId};
use crate::recommend::ScoredItem;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub title: String,
    pub k: Option<usize>,
}

#[derive(Debug, Serialize)]
struct Recommendation<'a> {
    #[serde(flatten)]
    item: ItemSummary<'a>,
    score: f64,
}

fn recommendation_json(query: &Item, k: usize, results: Vec<ScoredItem<'_>>) -> Value {
    let results: Vec<Recommendation<'_>> = results
        .into_iter()
        .map(|s| Recommendation {
            item: ItemSummary::from(s.item),
            score: s.score,
        })
        .collect();
    serde_json::json!({
        "query": ItemSummary::from(query),
        "k": k,
        "results": results,
    })
}

/// GET /api/items/{id}/similar
pub async fn similar_to_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<KQuery>,
) -> ApiResult<Value> {
    let k = params.resolve(&state);
    let id = ItemId(id);
    let results = state.recommender.recommend_scored(&id, k)?;
    // recommend_scored already proved the id exists
    let query = state
        .recommender
        .catalog()
        .by_id(&id)
        .ok_or_else(|| crate::error::RecommendError::NotFound(id.to_string()))?;

    tracing::info!(item = %id, k, returned = results.len(), "Served recommendations");
    Ok(Json(recommendation_json(query, k, results)))
}

/// GET /api/recommend?title=
pub async fn by_title(
    State(state): State<AppState>,
    Query(params): Query<TitleQuery>,
) -> ApiResult<Value> {
    let k = params.k.unwrap_or(state.config.default_k);
    let results = state.recommender.recommend_by_title(&params.title, k)?;
    let query = state
        .recommender
        .catalog()
        .by_title(&params.title)
        .ok_or_else(|| crate::error::RecommendError::NotFound(params.title.clone()))?;

    tracing::info!(title = %params.title, k, returned = results.len(), "Served recommendations");
    Ok(Json(recommendation_json(query, k, results)))
}
