use crate::lemma::lemmatize;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref PUNCT: Regex = Regex::new(r"[^\w\s]").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "i","me","my","myself","we","our","ours","ourselves","you","you're","you've","you'll","you'd",
            "your","yours","yourself","yourselves","he","him","his","himself","she","she's","her","hers",
            "herself","it","it's","its","itself","they","them","their","theirs","themselves",
            "what","which","who","whom","this","that","that'll","these","those",
            "am","is","are","was","were","be","been","being","have","has","had","having","do","does","did","doing",
            "a","an","the","and","but","if","or","because","as","until","while","of","at","by","for","with",
            "about","against","between","into","through","during","before","after","above","below",
            "to","from","up","down","in","out","on","off","over","under","again","further","then","once",
            "here","there","when","where","why","how","all","any","both","each","few","more","most","other",
            "some","such","no","nor","not","only","own","same","so","than","too","very",
            "s","t","can","will","just","don","don't","should","should've","now",
            "d","ll","m","o","re","ve","y",
            "ain","aren","aren't","couldn","couldn't","didn","didn't","doesn","doesn't","hadn","hadn't",
            "hasn","hasn't","haven","haven't","isn","isn't","ma","mightn","mightn't","mustn","mustn't",
            "needn","needn't","shan","shan't","shouldn","shouldn't","wasn","wasn't","weren","weren't",
            "won","won't","wouldn","wouldn't"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Reduce a single surviving token to its index form: base form first, then stem.
fn reduce(token: &str) -> String {
    let lemma = lemmatize(token);
    STEMMER.stem(&lemma).into_owned()
}

/// Turn raw text into index terms.
///
/// NFKC folding and lowercasing come first, then every character that is neither a word
/// character nor whitespace is dropped, the remainder is split on whitespace, stop words are
/// removed and each token is lemmatized and stemmed. Order and duplicates are kept, so the
/// output length is the document (or query) length used by both rankers.
pub fn normalize(text: &str) -> Vec<String> {
    let folded = text.nfkc().collect::<String>().to_lowercase();
    let cleaned = PUNCT.replace_all(&folded, "");
    cleaned
        .split_whitespace()
        .filter(|token| !is_stopword(token))
        .map(reduce)
        .collect()
}
