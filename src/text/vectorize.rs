// Bag-of-words count vectorizer.
//
// The vocabulary keeps the `max_features` most frequent terms across the
// whole corpus (ties broken alphabetically), then each document becomes a
// dense vector of term counts over that vocabulary. Catalogs are a few
// hundred items, so dense vectors are cheaper than a sparse format here.

use std::collections::{BTreeMap, HashMap};

use super::tokenize::Analyzer;

/// Fitted vocabulary: term -> column index.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }
}

pub struct CountVectorizer<'a> {
    analyzer: &'a dyn Analyzer,
    /// Keep only this many terms (None = keep all)
    pub max_features: Option<usize>,
}

impl<'a> CountVectorizer<'a> {
    pub fn new(analyzer: &'a dyn Analyzer) -> Self {
        Self {
            analyzer,
            max_features: None,
        }
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Learn the vocabulary from `documents` and return one count vector
    /// per document, in input order.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> (Vocabulary, Vec<Vec<f64>>) {
        let analyzed: Vec<Vec<String>> = documents
            .iter()
            .map(|d| self.analyzer.analyze(d.as_ref()))
            .collect();

        // BTreeMap gives alphabetical order, which the stable sort below
        // preserves among equal frequencies.
        let mut frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for terms in &analyzed {
            for term in terms {
                *frequency.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(max) = self.max_features {
            ranked.truncate(max);
        }

        let mut vocab = Vocabulary::default();
        for (term, _) in ranked {
            vocab.index.insert(term.to_string(), vocab.terms.len());
            vocab.terms.push(term.to_string());
        }

        let vectors = analyzed
            .iter()
            .map(|terms| {
                let mut counts = vec![0.0; vocab.len()];
                for term in terms {
                    if let Some(col) = vocab.column(term) {
                        counts[col] += 1.0;
                    }
                }
                counts
            })
            .collect();

        (vocab, vectors)
    }
}
