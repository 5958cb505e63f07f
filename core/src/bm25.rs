//! Okapi BM25 ranking.

use crate::config::Bm25Params;
use crate::corpus::Document;
use crate::index::InvertedIndex;
use crate::ranking::{rank, Hit};
use crate::tokenizer::normalize;

/// Robertson-Sparck Jones idf, unclamped: terms in more than half the corpus go negative and
/// penalize the documents that contain them.
pub fn idf(num_docs: usize, df: u32) -> f64 {
    let n = num_docs as f64;
    let df = df as f64;
    ((n - df + 0.5) / (df + 0.5)).ln()
}

/// Contribution of one posting, given the term's idf.
pub fn term_score(idf: f64, tf: f64, doc_len: f64, avg_doc_len: f64, params: &Bm25Params) -> f64 {
    let rel_len = if avg_doc_len > 0.0 { doc_len / avg_doc_len } else { 0.0 };
    let numerator = tf * (params.k1 + 1.0);
    let denominator = tf + params.k1 * (1.0 - params.b + params.b * rel_len);
    if denominator == 0.0 {
        return 0.0;
    }
    idf * numerator / denominator
}

pub fn search<'a>(
    index: &InvertedIndex,
    documents: &'a [Document],
    query: &str,
    params: &Bm25Params,
) -> Vec<Hit<'a>> {
    let query_terms = normalize(query);
    let n = index.num_docs();
    if query_terms.is_empty() || n == 0 {
        return Vec::new();
    }
    let avg_doc_len = index.avg_doc_len();

    let mut scores = vec![0.0f64; n];
    // Every occurrence counts, so a repeated query term adds its contribution again.
    for term in &query_terms {
        let Some(postings) = index.postings(term) else { continue };
        let idf_t = idf(n, index.doc_frequency(term));
        for p in postings {
            let doc_len = index.doc_len(p.doc_id) as f64;
            scores[p.doc_id as usize] += term_score(idf_t, p.tf as f64, doc_len, avg_doc_len, params);
        }
    }

    let hits = rank(scores, documents);
    tracing::debug!(query, hits = hits.len(), "bm25 search");
    hits
}
