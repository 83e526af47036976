// Colored terminal output for recommendations, country lists and picks.
//
// main.rs does the lookups; everything printed lives here.

use colored::Colorize;

use crate::catalog::Item;
use crate::pipeline::build::BuildSummary;
use crate::recommend::picks::FeaturedPick;
use crate::recommend::ScoredItem;

use super::truncate_chars;

/// Display the ranked recommendations for a query title.
pub fn display_recommendations(query: &Item, results: &[ScoredItem<'_>]) {
    println!(
        "\n{}",
        format!(
            "=== {} recommendations similar to \"{}\" ===",
            results.len(),
            query.title
        )
        .bold()
    );
    println!();

    if results.is_empty() {
        println!("  {}", "The catalog has no other titles to compare against.".dimmed());
        return;
    }

    for (i, scored) in results.iter().enumerate() {
        println!(
            "  {:>2}. {:<40} {}  {}",
            i + 1,
            scored.item.title,
            colorize_score(scored.score),
            scored.item.country.dimmed(),
        );
    }
}

/// Display one country's top-rated titles.
pub fn display_top_by_country(country: &str, items: &[&Item]) {
    println!("\n{}", country.bold());
    if items.is_empty() {
        println!("  {} No rated dramas found for {country}", "!".yellow());
        return;
    }
    for (i, item) in items.iter().enumerate() {
        let rating = item
            .rating
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| "?".to_string());
        println!("  {}. {}  {} {}", (i + 1).to_string().bold(), item.title, "*".yellow(), rating);
    }
}

/// Display title suggestions for a partial query.
pub fn display_search(query: &str, items: &[&Item]) {
    if items.is_empty() {
        println!("No titles match \"{query}\".");
        return;
    }
    println!("\n{}", format!("Titles matching \"{query}\":").bold());
    for item in items {
        println!(
            "  {:<40} {}  {}",
            item.title,
            item.country.dimmed(),
            truncate_chars(&item.feature_text, 60).dimmed()
        );
    }
}

/// Display the curated "watch next" picks.
pub fn display_picks(picks: &[FeaturedPick<'_>]) {
    println!("\n{}", "=== You Should Watch Next ===".bold());
    for pick in picks {
        match pick.item {
            Some(item) => println!(
                "  {} {}  {}",
                "*".yellow(),
                pick.title.bold(),
                format!("({}, {})", item.country, item.rating_label).dimmed()
            ),
            None => println!("  {} {}", "*".yellow(), pick.title.bold()),
        }
    }
}

/// Display what `matcha build` wrote.
pub fn display_build_summary(summary: &BuildSummary) {
    println!("\n{}", "Artifacts built.".bold());
    println!("  Items:     {}", summary.items);
    println!("  Countries: {}", summary.countries.join(", "));
    println!("  Catalog:   {}", summary.catalog_path.display());
    println!("  Matrix:    {}", summary.matrix_path.display());
}

fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:.3}");
    if score >= 0.5 {
        text.green().bold()
    } else if score >= 0.25 {
        text.green()
    } else if score > 0.0 {
        text.yellow()
    } else {
        text.dimmed()
    }
}
