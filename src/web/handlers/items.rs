// Item listing, title suggestions and detail.
//
// GET /api/items            full catalog summary, catalog order
// GET /api/items?q=love     title suggestions (case-insensitive substring)
// GET /api/items/{id}       single item

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiResult;
use crate::catalog::{Item, ItemId, MAX_SUGGESTIONS};
use crate::error::RecommendError;
use crate::web::AppState;

/// Hard cap on suggestion results.
const MAX_LIMIT: usize = 50;

#[derive(Debug, Deserialize, Default)]
pub struct ItemsQuery {
    /// Partial title to match
    pub q: Option<String>,
    /// Max suggestions (default 10, max 50)
    pub limit: Option<usize>,
}

/// Compact item shape for lists.
#[derive(Debug, Serialize)]
pub struct ItemSummary<'a> {
    pub id: &'a ItemId,
    pub title: &'a str,
    pub country: &'a str,
    pub rating: Option<f64>,
}

impl<'a> From<&'a Item> for ItemSummary<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            id: &item.id,
            title: &item.title,
            country: &item.country,
            rating: item.rating,
        }
    }
}

/// GET /api/items: the catalog, or suggestions when `q` is given.
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ItemsQuery>,
) -> Json<Value> {
    let catalog = state.recommender.catalog();

    let items: Vec<ItemSummary<'_>> = match params.q.as_deref() {
        Some(q) => {
            let limit = params.limit.unwrap_or(MAX_SUGGESTIONS).clamp(1, MAX_LIMIT);
            catalog.search(q, limit).into_iter().map(ItemSummary::from).collect()
        }
        None => catalog.items().iter().map(ItemSummary::from).collect(),
    };

    Json(serde_json::json!({
        "total": items.len(),
        "items": items,
    }))
}

/// GET /api/items/{id}
pub async fn get_item(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Item> {
    let id = ItemId(id);
    state
        .recommender
        .catalog()
        .by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| RecommendError::NotFound(id.to_string()))
}
