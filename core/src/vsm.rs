//! Cosine-normalized TF-IDF ranking.
//!
//! Document vectors are divided by the norm of their *raw* term frequencies rather than of
//! their TF-IDF weights, so scores approximate cosine similarity without being exact.

use crate::corpus::Document;
use crate::index::InvertedIndex;
use crate::ranking::{rank, Hit};
use crate::tokenizer::normalize;
use std::collections::HashSet;

/// `ln(N / (df + 1))`. Negative when a term occurs in every document.
pub fn idf(num_docs: usize, df: u32) -> f64 {
    (num_docs as f64 / (df as f64 + 1.0)).ln()
}

/// Unit-length query weights for the distinct query terms known to the index.
pub fn query_weights(index: &InvertedIndex, query_terms: &[String]) -> Vec<(String, f64)> {
    let n = index.num_docs();
    let total = query_terms.len() as f64;
    let mut seen = HashSet::new();
    let mut weights: Vec<(String, f64)> = Vec::new();
    for term in query_terms {
        if !seen.insert(term.as_str()) || !index.contains(term) {
            continue;
        }
        let count = query_terms.iter().filter(|t| *t == term).count() as f64;
        let tf = count / total;
        weights.push((term.clone(), tf * idf(n, index.doc_frequency(term))));
    }
    let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in weights.iter_mut() {
            *w /= norm;
        }
    }
    weights
}

pub fn search<'a>(index: &InvertedIndex, documents: &'a [Document], query: &str) -> Vec<Hit<'a>> {
    let query_terms = normalize(query);
    let weights = query_weights(index, &query_terms);
    if weights.is_empty() {
        return Vec::new();
    }

    let n = index.num_docs();
    let mut scores = vec![0.0f64; n];
    for (term, q_w) in &weights {
        let Some(postings) = index.postings(term) else { continue };
        let idf_t = idf(n, index.doc_frequency(term));
        for p in postings {
            let doc_len = index.doc_len(p.doc_id);
            if doc_len == 0 {
                continue;
            }
            let mut d_w = (p.tf as f64 / doc_len as f64) * idf_t;
            let norm = index.doc_norm(p.doc_id);
            if norm > 0.0 {
                d_w /= norm;
            }
            scores[p.doc_id as usize] += q_w * d_w;
        }
    }

    let hits = rank(scores, documents);
    tracing::debug!(query, hits = hits.len(), "vsm search");
    hits
}
