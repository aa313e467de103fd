// Lexical similarity: TF-IDF weighted unigram + bigram vectors.
//
// The vocabulary is fitted per request over exactly {query} ∪ corpus, so
// scores are comparable only within a single invocation. Weighting follows
// the common smoothed formulation:
//
//   idf(t)   = ln((1 + n) / (1 + df(t))) + 1
//   w(t, d)  = count(t, d) * idf(t), then each document vector is L2-normalised
//
// Tokens are lowercased runs of two or more word characters; English stop
// words are removed before n-grams are formed, so "this is a test sentence"
// contributes "test", "sentence", and "test sentence".

use std::collections::{HashMap, HashSet};

use stop_words::{get, LANGUAGE};
use tracing::debug;

use super::vector::to_percentage;
use crate::text::document::Document;

/// Sparse vector: (vocabulary index, weight) pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// TF-IDF vectorizer over word n-grams.
pub struct TfIdfVectorizer {
    stop_words: HashSet<&'static str>,
    /// Smallest n-gram length (inclusive)
    pub min_n: usize,
    /// Largest n-gram length (inclusive)
    pub max_n: usize,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self {
            stop_words: get(LANGUAGE::English).iter().copied().collect(),
            min_n: 1,
            max_n: 2,
        }
    }
}

impl TfIdfVectorizer {
    /// Turn a text into its list of n-gram terms (with repeats).
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let tokens: Vec<&str> = lower
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|t| t.chars().count() >= 2)
            .filter(|t| !self.stop_words.contains(t))
            .collect();

        let mut terms = Vec::new();
        for n in self.min_n..=self.max_n {
            if n == 0 || tokens.len() < n {
                continue;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    /// Fit a vocabulary over `documents` and return one L2-normalised TF-IDF
    /// vector per document, in order.
    pub fn fit_transform(&self, documents: &[String]) -> Vec<SparseVector> {
        let analyzed: Vec<Vec<String>> = documents.iter().map(|d| self.analyze(d)).collect();

        // Vocabulary and document frequencies
        let mut vocabulary: HashMap<&str, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();
        for terms in &analyzed {
            let unique: HashSet<&str> = terms.iter().map(|t| t.as_str()).collect();
            for term in unique {
                let next_index = vocabulary.len();
                let index = *vocabulary.entry(term).or_insert(next_index);
                if index == document_frequency.len() {
                    document_frequency.push(0);
                }
                document_frequency[index] += 1;
            }
        }

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        debug!(
            documents = documents.len(),
            vocabulary = vocabulary.len(),
            "Fitted TF-IDF vocabulary"
        );

        analyzed
            .iter()
            .map(|terms| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for term in terms {
                    if let Some(&index) = vocabulary.get(term.as_str()) {
                        *counts.entry(index).or_insert(0.0) += 1.0;
                    }
                }
                let mut vector: SparseVector = counts
                    .into_iter()
                    .map(|(index, tf)| (index, tf * idf[index]))
                    .collect();
                vector.sort_by_key(|&(index, _)| index);
                normalize_sparse(&mut vector);
                vector
            })
            .collect()
    }
}

fn normalize_sparse(v: &mut SparseVector) {
    let norm = v.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > f64::EPSILON {
        for (_, w) in v.iter_mut() {
            *w /= norm;
        }
    }
}

/// Dot product of two index-sorted sparse vectors (merge join).
pub fn sparse_dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

/// Highest TF-IDF cosine between the query and any corpus document, as a
/// percentage. An empty corpus (or a vocabulary made only of stop words)
/// scores 0.
pub fn score_lexical(query: &Document, corpus: &[Document]) -> f64 {
    score_lexical_with(&TfIdfVectorizer::default(), query, corpus)
}

/// `score_lexical` with an explicit vectorizer.
pub fn score_lexical_with(
    vectorizer: &TfIdfVectorizer,
    query: &Document,
    corpus: &[Document],
) -> f64 {
    if corpus.is_empty() {
        return 0.0;
    }

    let mut texts = Vec::with_capacity(corpus.len() + 1);
    texts.push(query.full_text());
    texts.extend(corpus.iter().map(|d| d.full_text()));

    let vectors = vectorizer.fit_transform(&texts);
    let (query_vec, corpus_vecs) = match vectors.split_first() {
        Some(split) => split,
        None => return 0.0,
    };

    let best = corpus_vecs
        .iter()
        .map(|v| sparse_dot(query_vec, v))
        .fold(0.0_f64, f64::max);

    to_percentage(best)
}
