use crate::corpus::Document;
use crate::tokenizer::normalize;
use std::collections::HashMap;

pub type DocId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    /// Raw occurrence count of the term in the document's normalized text.
    pub tf: u32,
}

/// Term to postings map plus the per-document statistics both rankers read.
///
/// Built once and never mutated afterwards. Postings for a term are in ascending doc id
/// order and a document appears at most once per term.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<Posting>>,
    df: HashMap<String, u32>,
    doc_terms: Vec<Vec<String>>,
    /// Euclidean norm of each document's raw term frequency vector.
    doc_norms: Vec<f64>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    pub fn build(documents: &[Document]) -> Self {
        Self::build_with(documents, normalize)
    }

    /// Single pass over `documents`, normalizing each surrogate with `normalizer`.
    pub fn build_with<F>(documents: &[Document], normalizer: F) -> Self
    where
        F: Fn(&str) -> Vec<String>,
    {
        let mut index = Self::new();
        for (doc_id, doc) in documents.iter().enumerate() {
            let terms = normalizer(&doc.surrogate());
            let mut tf_counts: HashMap<&str, u32> = HashMap::new();
            for term in &terms {
                *tf_counts.entry(term.as_str()).or_insert(0) += 1;
            }
            for (term, tf) in tf_counts {
                index
                    .postings
                    .entry(term.to_string())
                    .or_default()
                    .push(Posting { doc_id: doc_id as DocId, tf });
                *index.df.entry(term.to_string()).or_insert(0) += 1;
            }
            index.doc_terms.push(terms);
        }
        index.doc_norms = index.compute_doc_norms();
        tracing::info!(num_docs = index.num_docs(), num_terms = index.num_terms(), "index built");
        index
    }

    fn compute_doc_norms(&self) -> Vec<f64> {
        let mut sums = vec![0.0f64; self.doc_terms.len()];
        for plist in self.postings.values() {
            for p in plist {
                let tf = p.tf as f64;
                sums[p.doc_id as usize] += tf * tf;
            }
        }
        sums.into_iter().map(f64::sqrt).collect()
    }

    pub fn num_docs(&self) -> usize { self.doc_terms.len() }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn contains(&self, term: &str) -> bool { self.postings.contains_key(term) }

    pub fn doc_frequency(&self, term: &str) -> u32 {
        self.df.get(term).copied().unwrap_or(0)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    /// Normalized token sequence of a document.
    pub fn doc_terms(&self, doc_id: DocId) -> &[String] {
        &self.doc_terms[doc_id as usize]
    }

    /// Token count of a document's normalized text.
    pub fn doc_len(&self, doc_id: DocId) -> usize {
        self.doc_terms[doc_id as usize].len()
    }

    pub fn doc_norm(&self, doc_id: DocId) -> f64 {
        self.doc_norms[doc_id as usize]
    }

    /// Mean normalized text length, 0 for an empty corpus.
    pub fn avg_doc_len(&self) -> f64 {
        if self.doc_terms.is_empty() {
            return 0.0;
        }
        let total: usize = self.doc_terms.iter().map(Vec::len).sum();
        total as f64 / self.doc_terms.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: DocId, caption: &str) -> Document {
        Document {
            id,
            filename: format!("{id}.jpg"),
            source_url: String::new(),
            alt_text: String::new(),
            caption: caption.to_string(),
        }
    }

    fn whitespace(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn counts_postings_and_df() {
        let docs = vec![doc(0, "x y x"), doc(1, "y z"), doc(2, "")];
        let index = InvertedIndex::build_with(&docs, whitespace);
        assert_eq!(index.postings("x").unwrap(), &[Posting { doc_id: 0, tf: 2 }]);
        assert_eq!(
            index.postings("y").unwrap(),
            &[Posting { doc_id: 0, tf: 1 }, Posting { doc_id: 1, tf: 1 }]
        );
        assert_eq!(index.doc_frequency("y"), 2);
        assert_eq!(index.doc_frequency("missing"), 0);
        assert_eq!(index.num_terms(), 3);
    }

    #[test]
    fn norms_use_raw_frequencies() {
        let docs = vec![doc(0, "x y x"), doc(1, "y z"), doc(2, "")];
        let index = InvertedIndex::build_with(&docs, whitespace);
        assert!((index.doc_norm(0) - 5f64.sqrt()).abs() < 1e-12);
        assert!((index.doc_norm(1) - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(index.doc_norm(2), 0.0);
    }

    #[test]
    fn lengths_and_average() {
        let docs = vec![doc(0, "x y x"), doc(1, "y z"), doc(2, "")];
        let index = InvertedIndex::build_with(&docs, whitespace);
        assert_eq!(index.doc_len(0), 3);
        assert_eq!(index.doc_len(2), 0);
        assert!((index.avg_doc_len() - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(InvertedIndex::new().avg_doc_len(), 0.0);
    }
}
