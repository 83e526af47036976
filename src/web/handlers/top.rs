// Top-rated titles by country.
//
// GET /api/top/{country}?k=5 one country
// GET /api/top?k=5           every configured country (MATCHA_TOP_COUNTRIES)

use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value;

use super::items::ItemSummary;
use super::{ApiResult, KQuery};
use crate::web::AppState;

/// GET /api/top/{country}
pub async fn by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(params): Query<KQuery>,
) -> ApiResult<Value> {
    let k = params.resolve(&state);
    let items = state.recommender.top_by_country(&country, k)?;
    let items: Vec<ItemSummary<'_>> = items.into_iter().map(ItemSummary::from).collect();
    Ok(Json(serde_json::json!({
        "country": country,
        "items": items,
    })))
}

/// GET /api/top
pub async fn configured_countries(
    State(state): State<AppState>,
    Query(params): Query<KQuery>,
) -> ApiResult<Value> {
    let k = params.resolve(&state);
    let mut sections = Vec::with_capacity(state.config.top_countries.len());
    for country in &state.config.top_countries {
        let items: Vec<ItemSummary<'_>> = state
            .recommender
            .top_by_country(country, k)?
            .into_iter()
            .map(ItemSummary::from)
            .collect();
        sections.push(serde_json::json!({
            "country": country,
            "items": items,
        }));
    }
    Ok(Json(serde_json::json!({ "countries": sections })))
}
