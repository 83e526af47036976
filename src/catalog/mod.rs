// Catalog: the ordered, read-only item table.
//
// Catalog order is the order items first appeared in the curated dataset
// (after duplicate titles are dropped). Every tie-break in the crate falls
// back to this order, so the catalog never reorders its items after
// construction.

pub mod dataset;
pub mod rating;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Current on-disk artifact version for `catalog.json`.
pub const CATALOG_VERSION: u32 = 1;

/// Maximum number of title suggestions returned by `Catalog::search`.
pub const MAX_SUGGESTIONS: usize = 10;

/// Stable identifier for a catalog item: a slug derived from its title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single drama in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub country: String,
    /// Numeric rating extracted from `rating_label`, if any
    pub rating: Option<f64>,
    /// Raw rating text as curated, e.g. "8.5/10 (MDL)"
    pub rating_label: String,
    pub episodes: u32,
    pub duration: String,
    pub release_date: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Lowercased summary, genres and themes: the input to vectorization
    pub feature_text: String,
}

/// On-disk shape of `catalog.json`.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    version: u32,
    items: Vec<Item>,
}

/// Immutable, ordered item table with id and title indexes.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    by_id: HashMap<ItemId, usize>,
    by_title: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from items in catalog order.
    ///
    /// Fails on an empty item list or a duplicated id. Duplicate titles are
    /// tolerated; title lookup resolves to the first occurrence.
    pub fn new(items: Vec<Item>) -> Result<Self, LoadError> {
        if items.is_empty() {
            return Err(LoadError::EmptyCatalog);
        }

        let mut by_id = HashMap::with_capacity(items.len());
        let mut by_title = HashMap::with_capacity(items.len());

        for (idx, item) in items.iter().enumerate() {
            if by_id.insert(item.id.clone(), idx).is_some() {
                return Err(LoadError::DuplicateId(item.id.to_string()));
            }
            by_title.entry(normalize_title(&item.title)).or_insert(idx);
        }

        Ok(Self {
            items,
            by_id,
            by_title,
        })
    }

    /// Load `catalog.json` written by `Catalog::save`.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file: CatalogFile =
            serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        if file.version != CATALOG_VERSION {
            return Err(LoadError::UnsupportedVersion {
                path: path.display().to_string(),
                found: file.version,
            });
        }
        Self::new(file.items)
    }

    /// Write the catalog as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let file = CatalogFile {
            version: CATALOG_VERSION,
            items: self.items.clone(),
        };
        crate::write_json(path, &file)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Item at a catalog position.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Catalog position of an id.
    pub fn index_of(&self, id: &ItemId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn by_id(&self, id: &ItemId) -> Option<&Item> {
        self.index_of(id).map(|idx| &self.items[idx])
    }

    /// Case-insensitive exact title lookup (surrounding whitespace ignored).
    pub fn by_title(&self, title: &str) -> Option<&Item> {
        self.by_title
            .get(&normalize_title(title))
            .map(|&idx| &self.items[idx])
    }

    /// Title suggestions: case-insensitive substring match, catalog order.
    ///
    /// An empty or whitespace-only query returns nothing rather than the
    /// whole catalog.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Item> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.items
            .iter()
            .filter(|item| item.title.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// Distinct countries in order of first appearance.
    pub fn countries(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.iter().any(|c| c.eq_ignore_ascii_case(&item.country)) {
                seen.push(item.country.as_str());
            }
        }
        seen
    }
}

fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Turn a title into a URL-safe slug: lowercase ASCII alphanumerics joined by `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("item");
    }
    slug
}

/// Assign unique ids to a list of titles, in order.
///
/// Colliding slugs get a numeric suffix (`-2`, `-3`, ...) so the first
/// occurrence keeps the bare slug.
pub fn assign_ids<'a, I>(titles: I) -> Vec<ItemId>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut used: HashSet<String> = HashSet::new();
    let mut ids = Vec::new();
    for title in titles {
        let base = slugify(title);
        let mut candidate = base.clone();
        let mut n = 1;
        while used.contains(&candidate) {
            n += 1;
            candidate = format!("{base}-{n}");
        }
        used.insert(candidate.clone());
        ids.push(ItemId(candidate));
    }
    ids
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn item(title: &str, country: &str, rating: Option<f64>, text: &str) -> Item {
        Item {
            id: ItemId(slugify(title)),
            title: title.to_string(),
            country: country.to_string(),
            rating,
            rating_label: rating.map(|r| format!("{r}/10")).unwrap_or_default(),
            episodes: 12,
            duration: "45 min".to_string(),
            release_date: "2021-01-01".to_string(),
            poster_url: None,
            feature_text: text.to_string(),
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("2gether The Series"), "2gether-the-series");
        assert_eq!(slugify("Jun & Jun"), "jun-jun");
        assert_eq!(slugify("  Semantic Error!  "), "semantic-error");
        assert_eq!(slugify("!!!"), "item");
    }

    #[test]
    fn test_assign_ids_dedupes_collisions() {
        let ids = assign_ids(["Jun & Jun", "Jun Jun", "Other", "jun-jun"]);
        let ids: Vec<&str> = ids.iter().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["jun-jun", "jun-jun-2", "other", "jun-jun-3"]);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(Catalog::new(vec![]), Err(LoadError::EmptyCatalog)));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let a = item("Same", "Thailand", None, "x");
        let b = item("Same", "Japan", None, "y");
        match Catalog::new(vec![a, b]) {
            Err(LoadError::DuplicateId(id)) => assert_eq!(id, "same"),
            other => panic!("expected DuplicateId, got {other:?}"),
        }
    }

    #[test]
    fn test_title_lookup_is_case_insensitive() {
        let catalog = Catalog::new(vec![
            item("Love in the Air", "Thailand", Some(8.0), "a"),
            item("Semantic Error", "South Korea", Some(8.3), "b"),
        ])
        .unwrap();
        assert_eq!(
            catalog.by_title("  love IN the air ").map(|i| i.id.as_str()),
            Some("love-in-the-air")
        );
        assert!(catalog.by_title("Missing").is_none());
    }

    #[test]
    fn test_search_substring_in_catalog_order() {
        let catalog = Catalog::new(vec![
            item("Love in the Air", "Thailand", None, "a"),
            item("Semantic Error", "South Korea", None, "b"),
            item("Love Mechanics", "Thailand", None, "c"),
        ])
        .unwrap();
        let titles: Vec<&str> = catalog
            .search("LOVE", MAX_SUGGESTIONS)
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Love in the Air", "Love Mechanics"]);
        assert!(catalog.search("   ", MAX_SUGGESTIONS).is_empty());
        assert_eq!(catalog.search("e", 1).len(), 1);
    }

    #[test]
    fn test_countries_first_seen_order() {
        let catalog = Catalog::new(vec![
            item("A", "Thailand", None, "a"),
            item("B", "Japan", None, "b"),
            item("C", "thailand", None, "c"),
        ])
        .unwrap();
        assert_eq!(catalog.countries(), vec!["Thailand", "Japan"]);
    }
}
