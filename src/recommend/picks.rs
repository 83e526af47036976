// Curated "you should watch next" picks.
//
// These are hand-chosen and independent of the similarity engine. They are
// matched to catalog entries by title when possible so the UI can link
// through to recommendations; a pick missing from the catalog is still shown.

use serde::Serialize;

use crate::catalog::Item;

pub struct PickEntry {
    pub title: &'static str,
    pub image_url: &'static str,
}

pub const FEATURED_PICKS: &[PickEntry] = &[
    PickEntry {
        title: "2gether The Series",
        image_url: "https://encrypted-tbn2.gstatic.com/images?q=tbn:ANd9GcS-y4Vp35wbn8yIBeakPrXEGuij2djmctVlxHpQMA4n28Vv1sHN",
    },
    PickEntry {
        title: "Love in the Air",
        image_url: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQXsgce6r_jq2Mks-ZCshGpQUHFe9eWyspjvlfOOb13IzCN5nOA",
    },
    PickEntry {
        title: "Jun & Jun",
        image_url: "https://i.mydramalist.com/d0O3r5_4f.jpg",
    },
];

/// A pick plus its catalog record, when the catalog has one.
#[derive(Debug, Clone, Serialize)]
pub struct FeaturedPick<'a> {
    pub title: &'static str,
    pub image_url: &'static str,
    pub item: Option<&'a Item>,
}
