use crate::error::{EngineError, Result};
use crate::index::DocId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One image record. Ids are assigned in load order and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    #[serde(skip_serializing)]
    pub id: DocId,
    pub filename: String,
    pub source_url: String,
    pub alt_text: String,
    pub caption: String,
}

impl Document {
    /// Text that gets indexed: alt text and caption joined by a single space.
    pub fn surrogate(&self) -> String {
        format!("{} {}", self.alt_text, self.caption)
    }
}

#[derive(Debug, Deserialize)]
struct StoreEntry {
    source_url: String,
    alt_text: String,
    analysis: Analysis,
}

#[derive(Debug, Deserialize)]
struct Analysis {
    caption: String,
}

#[derive(Debug)]
pub struct SkippedRecord {
    pub filename: String,
    pub error: EngineError,
}

#[derive(Debug, Default)]
pub struct LoadedCorpus {
    pub documents: Vec<Document>,
    pub skipped: Vec<SkippedRecord>,
}

/// Open the metadata store at `path`. Failing to read or parse the file as a whole is fatal.
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<LoadedCorpus> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| EngineError::store_unavailable(path, e))?;
    let reader = BufReader::new(f);
    let store: Map<String, Value> = serde_json::from_reader(reader)
        .map_err(|e| EngineError::store_unavailable(path, e.into()))?;
    Ok(load_store(store))
}

pub fn load_reader<R: Read>(reader: R) -> Result<LoadedCorpus> {
    let store: Map<String, Value> = serde_json::from_reader(reader)
        .map_err(|e| EngineError::store_unavailable("<reader>", e.into()))?;
    Ok(load_store(store))
}

/// Materialize documents from an already parsed store, in key order.
///
/// Entries missing `source_url`, `alt_text` or `analysis.caption` are logged and skipped;
/// ids stay dense over the entries that did load.
pub fn load_store(store: Map<String, Value>) -> LoadedCorpus {
    let mut corpus = LoadedCorpus::default();
    for (filename, value) in store {
        match serde_json::from_value::<StoreEntry>(value) {
            Ok(entry) => {
                let id = corpus.documents.len() as DocId;
                corpus.documents.push(Document {
                    id,
                    filename,
                    source_url: entry.source_url,
                    alt_text: entry.alt_text,
                    caption: entry.analysis.caption,
                });
            }
            Err(e) => {
                tracing::warn!(%filename, error = %e, "skipping malformed record");
                let error = EngineError::malformed(filename.clone(), e);
                corpus.skipped.push(SkippedRecord { filename, error });
            }
        }
    }
    tracing::info!(loaded = corpus.documents.len(), skipped = corpus.skipped.len(), "corpus loaded");
    corpus
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn assigns_ids_in_key_order() {
        let corpus = load_store(store(json!({
            "zeta.jpg": { "source_url": "http://z", "alt_text": "z", "analysis": { "caption": "a zebra" } },
            "alpha.jpg": { "source_url": "http://a", "alt_text": "a", "analysis": { "caption": "an ant", "objects": [] }, "analyzed": true },
        })));
        let names: Vec<_> = corpus.documents.iter().map(|d| (d.id, d.filename.as_str())).collect();
        assert_eq!(names, vec![(0, "zeta.jpg"), (1, "alpha.jpg")]);
        assert_eq!(corpus.documents[1].caption, "an ant");
    }

    #[test]
    fn skips_records_without_caption() {
        let corpus = load_store(store(json!({
            "one.jpg": { "source_url": "u1", "alt_text": "one", "analysis": { "caption": "first" } },
            "two.jpg": { "source_url": "u2", "alt_text": "two" },
            "three.jpg": { "source_url": "u3", "alt_text": "three", "analysis": {} },
            "four.jpg": { "source_url": "u4", "alt_text": "four", "analysis": { "caption": "fourth" } },
        })));
        assert_eq!(corpus.documents.len(), 2);
        assert_eq!(corpus.documents[1].id, 1);
        assert_eq!(corpus.documents[1].filename, "four.jpg");
        let skipped: Vec<_> = corpus.skipped.iter().map(|s| s.filename.as_str()).collect();
        assert_eq!(skipped, vec!["two.jpg", "three.jpg"]);
        assert!(matches!(corpus.skipped[0].error, EngineError::MalformedRecord { .. }));
    }

    #[test]
    fn unparseable_store_is_unavailable() {
        let err = load_reader("not json".as_bytes()).unwrap_err();
        assert!(matches!(err, EngineError::StoreUnavailable { .. }));
    }

    #[test]
    fn surrogate_joins_with_one_space() {
        let corpus = load_store(store(json!({
            "x.jpg": { "source_url": "u", "alt_text": "Red bike", "analysis": { "caption": "a bicycle" } },
        })));
        assert_eq!(corpus.documents[0].surrogate(), "Red bike a bicycle");
    }
}
