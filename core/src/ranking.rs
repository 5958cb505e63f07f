use crate::corpus::Document;
use crate::error::EngineError;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    #[default]
    Vsm,
    Bm25,
}

impl SearchMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMethod::Vsm => "vsm",
            SearchMethod::Bm25 => "bm25",
        }
    }
}

impl FromStr for SearchMethod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vsm" => Ok(SearchMethod::Vsm),
            "bm25" => Ok(SearchMethod::Bm25),
            _ => Err(EngineError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Hit<'a> {
    #[serde(flatten)]
    pub document: &'a Document,
    pub score: f64,
}

/// Keep strictly positive scores and order them by descending score.
///
/// The sort is stable over ascending doc ids, so equal scores keep load order.
pub(crate) fn rank<'a>(scores: Vec<f64>, documents: &'a [Document]) -> Vec<Hit<'a>> {
    let mut hits: Vec<Hit<'a>> = scores
        .into_iter()
        .zip(documents)
        .filter(|(score, _)| *score > 0.0)
        .map(|(score, document)| Hit { document, score })
        .collect();
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    hits
}
