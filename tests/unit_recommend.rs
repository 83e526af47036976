// Unit tests for ranking: recommend, top_by_country, featured picks.
//
// Catalogs and matrices are built by hand so every score is known up front.

use matcha::catalog::{Catalog, Item, ItemId};
use matcha::error::{LoadError, RecommendError};
use matcha::recommend::Recommender;
use matcha::similarity::SimilarityMatrix;

fn item(id: &str, country: &str, rating: Option<f64>) -> Item {
    Item {
        id: ItemId::from(id),
        title: format!("Title {id}"),
        country: country.to_string(),
        rating,
        rating_label: rating.map(|r| format!("{r}/10 (MDL)")).unwrap_or_default(),
        episodes: 12,
        duration: "45 min".to_string(),
        release_date: "2021-01-01".to_string(),
        poster_url: None,
        feature_text: String::new(),
    }
}

/// Five items A..E; row A is {B: 0.9, C: 0.9, D: 0.5, E: 0.1}.
fn five_item_recommender() -> Recommender {
    let items = vec![
        item("a", "Thailand", Some(8.0)),
        item("b", "Thailand", Some(9.1)),
        item("c", "South Korea", Some(7.5)),
        item("d", "Thailand", Some(9.1)),
        item("e", "Japan", None),
    ];
    let ids: Vec<ItemId> = items.iter().map(|i| i.id.clone()).collect();
    let rows = vec![
        vec![1.0, 0.9, 0.9, 0.5, 0.1],
        vec![0.9, 1.0, 0.2, 0.3, 0.0],
        vec![0.9, 0.2, 1.0, 0.4, 0.0],
        vec![0.5, 0.3, 0.4, 1.0, 0.6],
        vec![0.1, 0.0, 0.0, 0.6, 1.0],
    ];
    let catalog = Catalog::new(items).unwrap();
    let matrix = SimilarityMatrix::from_rows(ids, rows).unwrap();
    Recommender::new(catalog, matrix).unwrap()
}

fn ids(items: &[&Item]) -> Vec<String> {
    items.iter().map(|i| i.id.to_string()).collect()
}

// ============================================================
// recommend
// ============================================================

#[test]
fn tie_keeps_catalog_order() {
    let rec = five_item_recommender();
    let result = rec.recommend(&ItemId::from("a"), 2).unwrap();
    assert_eq!(ids(&result), vec!["b", "c"]);
}

#[test]
fn k_larger_than_catalog_returns_all_others() {
    let rec = five_item_recommender();
    let result = rec.recommend(&ItemId::from("a"), 10).unwrap();
    assert_eq!(ids(&result), vec!["b", "c", "d", "e"]);
}

#[test]
fn query_item_never_in_results() {
    let rec = five_item_recommender();
    for id in ["a", "b", "c", "d", "e"] {
        let result = rec.recommend(&ItemId::from(id), 4).unwrap();
        assert_eq!(result.len(), 4);
        assert!(result.iter().all(|i| i.id.as_str() != id));
    }
}

#[test]
fn results_are_sorted_by_score_descending() {
    let rec = five_item_recommender();
    let scored = rec.recommend_scored(&ItemId::from("d"), 4).unwrap();
    let scores: Vec<f64> = scored.iter().map(|s| s.score).collect();
    assert_eq!(scores, vec![0.6, 0.5, 0.4, 0.3]);
}

#[test]
fn zero_k_is_invalid_argument() {
    let rec = five_item_recommender();
    let err = rec.recommend(&ItemId::from("a"), 0).unwrap_err();
    assert!(matches!(err, RecommendError::InvalidArgument(_)));
}

#[test]
fn unknown_id_is_not_found() {
    let rec = five_item_recommender();
    let err = rec.recommend(&ItemId::from("zzz"), 3).unwrap_err();
    assert_eq!(err, RecommendError::NotFound("zzz".to_string()));
}

#[test]
fn repeated_calls_are_identical() {
    let rec = five_item_recommender();
    let first = ids(&rec.recommend(&ItemId::from("a"), 3).unwrap());
    for _ in 0..10 {
        assert_eq!(ids(&rec.recommend(&ItemId::from("a"), 3).unwrap()), first);
    }
}

#[test]
fn single_item_catalog_returns_empty() {
    let only = item("solo", "Japan", Some(7.0));
    let catalog = Catalog::new(vec![only]).unwrap();
    let matrix =
        SimilarityMatrix::from_rows(vec![ItemId::from("solo")], vec![vec![1.0]]).unwrap();
    let rec = Recommender::new(catalog, matrix).unwrap();
    assert!(rec.recommend(&ItemId::from("solo"), 5).unwrap().is_empty());
}

#[test]
fn by_title_is_case_insensitive() {
    let rec = five_item_recommender();
    let result = rec.recommend_by_title("  title A ", 1).unwrap();
    assert_eq!(result[0].item.id.as_str(), "b");
    assert_eq!(result[0].score, 0.9);
}

#[test]
fn by_title_unknown_is_not_found() {
    let rec = five_item_recommender();
    assert!(matches!(
        rec.recommend_by_title("Nope", 3),
        Err(RecommendError::NotFound(_))
    ));
}

// ============================================================
// top_by_country
// ============================================================

#[test]
fn top_by_country_sorts_by_rating_then_catalog_order() {
    let rec = five_item_recommender();
    let result = rec.top_by_country("thailand", 5).unwrap();
    // b and d tie at 9.1; b comes first in the catalog
    assert_eq!(ids(&result), vec!["b", "d", "a"]);
}

#[test]
fn top_by_country_truncates_to_k() {
    let rec = five_item_recommender();
    assert_eq!(ids(&rec.top_by_country("Thailand", 1).unwrap()), vec!["b"]);
}

#[test]
fn top_by_country_skips_unrated() {
    let rec = five_item_recommender();
    assert!(rec.top_by_country("Japan", 3).unwrap().is_empty());
}

#[test]
fn top_by_country_unknown_country_is_empty() {
    let rec = five_item_recommender();
    assert!(rec.top_by_country("Narnia", 3).unwrap().is_empty());
}

#[test]
fn top_by_country_zero_k_is_invalid() {
    let rec = five_item_recommender();
    assert!(matches!(
        rec.top_by_country("Thailand", 0),
        Err(RecommendError::InvalidArgument(_))
    ));
}

// ============================================================
// featured picks and artifact pairing
// ============================================================

#[test]
fn featured_picks_are_static_and_ordered() {
    let rec = five_item_recommender();
    let picks = rec.featured_picks();
    let titles: Vec<&str> = picks.iter().map(|p| p.title).collect();
    assert_eq!(titles, vec!["2gether The Series", "Love in the Air", "Jun & Jun"]);
    // none of these titles are in the hand-built catalog
    assert!(picks.iter().all(|p| p.item.is_none()));
    assert!(picks.iter().all(|p| p.image_url.starts_with("https://")));
}

#[test]
fn mismatched_matrix_is_rejected() {
    let catalog = Catalog::new(vec![item("a", "Japan", None), item("b", "Japan", None)]).unwrap();
    let matrix = SimilarityMatrix::from_rows(
        vec![ItemId::from("a"), ItemId::from("c")],
        vec![vec![1.0, 0.0], vec![0.0, 1.0]],
    )
    .unwrap();
    assert!(matches!(
        Recommender::new(catalog, matrix),
        Err(LoadError::IdMismatch { .. })
    ));
}

#[test]
fn wrong_sized_matrix_is_rejected() {
    let catalog = Catalog::new(vec![item("a", "Japan", None), item("b", "Japan", None)]).unwrap();
    let matrix = SimilarityMatrix::from_rows(vec![ItemId::from("a")], vec![vec![1.0]]).unwrap();
    assert!(matches!(
        Recommender::new(catalog, matrix),
        Err(LoadError::DimensionMismatch { .. })
    ));
}

#[test]
fn non_square_rows_are_rejected() {
    let result = SimilarityMatrix::from_rows(
        vec![ItemId::from("a"), ItemId::from("b")],
        vec![vec![1.0, 0.5], vec![0.5]],
    );
    assert!(matches!(result, Err(LoadError::NotSquare { .. })));
}

#[test]
fn out_of_range_scores_are_rejected() {
    let result = SimilarityMatrix::from_rows(
        vec![ItemId::from("a"), ItemId::from("b")],
        vec![vec![1.0, 1.5], vec![0.5, 1.0]],
    );
    assert!(matches!(result, Err(LoadError::InvalidScore { .. })));
}
