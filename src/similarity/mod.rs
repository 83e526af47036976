// Pairwise item similarity: cosine over count vectors, stored as a dense
// matrix artifact.

pub mod matrix;

pub use matrix::SimilarityMatrix;

/// Cosine similarity between two equal-length vectors, clamped to [0, 1].
///
/// Returns 0.0 for mismatched lengths or when either vector is all zeros,
/// so an item with empty feature text is similar to nothing (itself included).
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(0.0, 1.0)
    }
}
