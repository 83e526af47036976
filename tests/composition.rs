// Composition tests: verifying the offline build and the serving path chain
// together correctly.
//
// These tests exercise the data flow between modules:
//   CSV -> Catalog -> Analyzer -> CountVectorizer -> SimilarityMatrix
//       -> artifacts on disk -> Recommender
// without any network calls. Artifacts go to a temp directory.

use matcha::catalog::ItemId;
use matcha::config::{CATALOG_FILE, MATRIX_FILE};
use matcha::error::LoadError;
use matcha::pipeline::build::build_artifacts;
use matcha::recommend::Recommender;
use matcha::text::tokenize::EnglishAnalyzer;

const CSV: &str = "\
Title,Country,Rating,Summary,Genres,Themes,Episodes,Duration,Release Date,Poster_URL
Campus Melody,Thailand,8.4/10 (MDL),A guitarist falls for an engineering student,\"Romance, Music\",University-romance,12,45 min,2020-05-01,
Band Practice,Thailand,7.9/10 (MDL),Two guitarists form a university band,\"Music, Romance\",University-life,10,40 min,2021-03-12,
Office Hours,South Korea,8.8/10 (MDL),A salaryman and his boss share an apartment,Comedy,Office-life,8,30 min,2022-07-01,
Quiet Harbor,Japan,,A fisherman rebuilds his village after the storm,Drama,,6,,,
Midnight Kitchen,South Korea,9.0/10 (MDL),A chef cooks for a salaryman every night,\"Food, Comedy\",Office-life,12,25 min,2023-01-15,
";

fn build() -> Recommender {
    let analyzer = EnglishAnalyzer::default();
    let (catalog, matrix) = build_artifacts(CSV, &analyzer).unwrap();
    Recommender::new(catalog, matrix).unwrap()
}

// ============================================================
// Chain: CSV -> Matrix
// ============================================================

#[test]
fn built_matrix_is_symmetric_and_bounded() {
    let rec = build();
    let matrix = rec.matrix();
    assert_eq!(matrix.len(), 5);
    assert!(matrix.is_symmetric(1e-12));
    for i in 0..matrix.len() {
        for j in 0..matrix.len() {
            let s = matrix.score(i, j);
            assert!((0.0..=1.0).contains(&s), "score {s} at ({i},{j})");
        }
    }
}

#[test]
fn building_twice_gives_identical_matrices() {
    let analyzer = EnglishAnalyzer::default();
    let (_, first) = build_artifacts(CSV, &analyzer).unwrap();
    let (_, second) = build_artifacts(CSV, &analyzer).unwrap();
    assert_eq!(first, second);
}

#[test]
fn related_titles_rank_first() {
    let rec = build();
    let results = rec.recommend(&ItemId::from("campus-melody"), 1).unwrap();
    assert_eq!(results[0].id.as_str(), "band-practice");

    let results = rec.recommend_by_title("office hours", 1).unwrap();
    assert_eq!(results[0].item.id.as_str(), "midnight-kitchen");
}

#[test]
fn every_item_gets_all_others_back() {
    let rec = build();
    for item in rec.catalog().items() {
        let results = rec.recommend(&item.id, 100).unwrap();
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.id != item.id));
    }
}

#[test]
fn unrated_rows_are_kept_but_not_ranked_by_country() {
    let rec = build();
    let harbor = rec.catalog().by_title("Quiet Harbor").unwrap();
    assert_eq!(harbor.rating, Some(5.7));
    assert_eq!(harbor.episodes, 6);

    let korea = rec.top_by_country("South Korea", 5).unwrap();
    let titles: Vec<&str> = korea.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Midnight Kitchen", "Office Hours"]);
}

// ============================================================
// Chain: artifacts on disk -> Recommender
// ============================================================

#[test]
fn saved_artifacts_load_back_identically() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = EnglishAnalyzer::default();
    let (catalog, matrix) = build_artifacts(CSV, &analyzer).unwrap();

    let catalog_path = dir.path().join(CATALOG_FILE);
    let matrix_path = dir.path().join(MATRIX_FILE);
    catalog.save(&catalog_path).unwrap();
    matrix.save(&matrix_path).unwrap();

    let in_memory = Recommender::new(catalog, matrix).unwrap();
    let loaded = Recommender::load(&catalog_path, &matrix_path).unwrap();

    let n = in_memory.matrix().len();
    assert_eq!(loaded.matrix().ids(), in_memory.matrix().ids());
    for i in 0..n {
        for j in 0..n {
            assert!((loaded.matrix().score(i, j) - in_memory.matrix().score(i, j)).abs() < 1e-12);
        }
    }
    assert_eq!(loaded.catalog().items(), in_memory.catalog().items());
    let id = ItemId::from("campus-melody");
    assert_eq!(
        loaded.recommend(&id, 3).unwrap(),
        in_memory.recommend(&id, 3).unwrap()
    );
}

#[test]
fn missing_artifact_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let result = Recommender::load(
        &dir.path().join(CATALOG_FILE),
        &dir.path().join(MATRIX_FILE),
    );
    assert!(matches!(result, Err(LoadError::Io { .. })));
}

#[test]
fn corrupt_artifact_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = EnglishAnalyzer::default();
    let (catalog, _) = build_artifacts(CSV, &analyzer).unwrap();

    let catalog_path = dir.path().join(CATALOG_FILE);
    let matrix_path = dir.path().join(MATRIX_FILE);
    catalog.save(&catalog_path).unwrap();
    std::fs::write(&matrix_path, b"{ not json").unwrap();

    assert!(matches!(
        Recommender::load(&catalog_path, &matrix_path),
        Err(LoadError::Parse { .. })
    ));
}

#[test]
fn artifacts_from_different_catalogs_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = EnglishAnalyzer::default();
    let (catalog, _) = build_artifacts(CSV, &analyzer).unwrap();
    let smaller = CSV.lines().take(4).collect::<Vec<_>>().join("\n");
    let (_, other_matrix) = build_artifacts(&smaller, &analyzer).unwrap();

    let catalog_path = dir.path().join(CATALOG_FILE);
    let matrix_path = dir.path().join(MATRIX_FILE);
    catalog.save(&catalog_path).unwrap();
    other_matrix.save(&matrix_path).unwrap();

    assert!(matches!(
        Recommender::load(&catalog_path, &matrix_path),
        Err(LoadError::DimensionMismatch { .. })
    ));
}
