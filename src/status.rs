// Artifact status display: file sizes, catalog size, matrix shape.

use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::recommend::Recommender;

/// Display artifact status to the terminal.
///
/// Missing artifacts are reported, not treated as an error; a present but
/// invalid pair is an error, because the server would refuse to start on it.
pub fn show(config: &Config) -> Result<()> {
    println!("Data directory: {}", config.data_dir.display());

    let catalog_path = config.catalog_path();
    let matrix_path = config.matrix_path();
    let mut missing = false;
    for (label, path) in [("Catalog", &catalog_path), ("Matrix", &matrix_path)] {
        match file_size(path) {
            Some(size) => println!("{label}: {} ({})", path.display(), format_bytes(size)),
            None => {
                println!("{label}: not built");
                missing = true;
            }
        }
    }
    if missing {
        println!("\nRun `matcha build` to create the artifacts.");
        return Ok(());
    }

    let recommender = Recommender::load(&catalog_path, &matrix_path)?;
    let catalog = recommender.catalog();
    let rated = catalog.items().iter().filter(|i| i.rating.is_some()).count();

    println!("Items: {} ({} rated)", catalog.len(), rated);
    println!("Countries: {}", catalog.countries().join(", "));
    println!(
        "Matrix: {n}x{n}, {}",
        if recommender.matrix().is_symmetric(1e-9) {
            "symmetric"
        } else {
            "asymmetric"
        },
        n = recommender.matrix().len()
    );
    println!("Default k: {}", config.default_k);

    Ok(())
}

fn file_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path).ok().map(|m| m.len())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
