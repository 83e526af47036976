// GET /api/picks: the curated "watch next" list.

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::web::AppState;

pub async fn list_picks(State(state): State<AppState>) -> Json<Value> {
    let picks: Vec<Value> = state
        .recommender
        .featured_picks()
        .into_iter()
        .map(|pick| {
            serde_json::json!({
                "title": pick.title,
                "image_url": pick.image_url,
                "id": pick.item.map(|i| i.id.as_str()),
            })
        })
        .collect();
    Json(serde_json::json!({ "picks": picks }))
}
