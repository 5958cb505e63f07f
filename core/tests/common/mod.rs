#![allow(dead_code)]

use imgsearch_core::{Document, EngineConfig, QueryEngine};

pub fn doc(caption: &str) -> Document {
    Document {
        id: 0,
        filename: format!("{}.jpg", caption.replace(' ', "_")),
        source_url: format!("https://example.com/{}", caption.replace(' ', "-")),
        alt_text: String::new(),
        caption: caption.to_string(),
    }
}

pub fn engine(captions: &[&str]) -> QueryEngine {
    QueryEngine::new(captions.iter().map(|c| doc(c)).collect(), EngineConfig::default())
}

/// The red/blue bicycle/car scenario padded with unrelated images so the shared terms stay
/// below half the corpus.
pub fn vehicles() -> QueryEngine {
    engine(&[
        "a red bicycle",
        "a blue car",
        "a red car",
        "a green tree",
        "a yellow flower",
        "a white house",
        "a black dog",
    ])
}
