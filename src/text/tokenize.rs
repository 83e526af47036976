// Tokenization and stop-word filtering for feature text.
//
// Tokens are runs of two or more alphanumeric characters, lowercased.
// Stop words are checked on the surface form, before stemming, so "this"
// is dropped instead of surviving as "thi".

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

use super::stem::{PorterStemmer, Stemmer};

/// Split text into lowercase alphanumeric tokens of length >= 2.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}

/// Text -> normalized terms. Swap-ready so alternative pipelines (no
/// stemming, other languages) can feed the same vectorizer.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Vec<String>;
}

/// English analyzer: tokenize, drop stop words, Porter-stem.
pub struct EnglishAnalyzer {
    stop_words: HashSet<String>,
    stemmer: Box<dyn Stemmer>,
}

impl Default for EnglishAnalyzer {
    fn default() -> Self {
        let stop_words: HashSet<String> = get(LANGUAGE::English).into_iter().collect();
        Self {
            stop_words,
            stemmer: Box::new(PorterStemmer),
        }
    }
}

impl EnglishAnalyzer {
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}

impl Analyzer for EnglishAnalyzer {
    fn analyze(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .filter(|t| !self.is_stop_word(t))
            .map(|t| self.stemmer.stem(&t))
            .collect()
    }
}
