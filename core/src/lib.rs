pub mod bm25;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod lemma;
pub mod ranking;
pub mod tokenizer;
pub mod vsm;

pub use config::{Bm25Params, EngineConfig};
pub use corpus::{Document, LoadedCorpus, SkippedRecord};
pub use engine::QueryEngine;
pub use error::{EngineError, Result};
pub use index::{DocId, InvertedIndex, Posting};
pub use ranking::{Hit, SearchMethod};
