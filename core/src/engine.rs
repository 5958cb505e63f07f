use crate::bm25;
use crate::config::EngineConfig;
use crate::corpus::{self, Document, SkippedRecord};
use crate::error::Result;
use crate::index::{DocId, InvertedIndex};
use crate::ranking::{Hit, SearchMethod};
use crate::vsm;
use std::collections::HashMap;
use std::path::Path;

/// Owns the corpus and its index for the lifetime of the process.
///
/// Everything is built in the constructor and read-only afterwards, so a `QueryEngine`
/// behind an `Arc` can serve any number of concurrent queries without locking.
#[derive(Debug)]
pub struct QueryEngine {
    documents: Vec<Document>,
    by_filename: HashMap<String, DocId>,
    index: InvertedIndex,
    skipped: Vec<SkippedRecord>,
    config: EngineConfig,
}

impl QueryEngine {
    /// Build over `documents`. Ids are reassigned to positions so they always index the list.
    pub fn new(mut documents: Vec<Document>, config: EngineConfig) -> Self {
        for (pos, doc) in documents.iter_mut().enumerate() {
            doc.id = pos as DocId;
        }
        let index = InvertedIndex::build(&documents);
        let by_filename = documents.iter().map(|d| (d.filename.clone(), d.id)).collect();
        Self { documents, by_filename, index, skipped: Vec::new(), config }
    }

    /// Load the metadata store at `path` and build the index over every well-formed record.
    pub fn open<P: AsRef<Path>>(path: P, config: EngineConfig) -> Result<Self> {
        let loaded = corpus::load_path(path)?;
        let mut engine = Self::new(loaded.documents, config);
        engine.skipped = loaded.skipped;
        Ok(engine)
    }

    pub fn all_documents(&self) -> &[Document] { &self.documents }

    pub fn document(&self, filename: &str) -> Option<&Document> {
        self.by_filename.get(filename).map(|&id| &self.documents[id as usize])
    }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    /// Records the loader rejected, in store order.
    pub fn skipped(&self) -> &[SkippedRecord] { &self.skipped }

    pub fn search_vsm(&self, query: &str) -> Vec<Hit<'_>> {
        vsm::search(&self.index, &self.documents, query)
    }

    pub fn search_bm25(&self, query: &str) -> Vec<Hit<'_>> {
        bm25::search(&self.index, &self.documents, query, &self.config.bm25)
    }

    pub fn search(&self, method: SearchMethod, query: &str) -> Vec<Hit<'_>> {
        match method {
            SearchMethod::Vsm => self.search_vsm(query),
            SearchMethod::Bm25 => self.search_bm25(query),
        }
    }
}
