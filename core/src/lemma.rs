//! Dictionary-free noun lemmatizer.
//!
//! Irregular plurals are looked up in a fixed table; everything else goes through
//! WordNet-style detachment rules. Without a dictionary to validate candidates the rules are
//! kept conservative: short words and `ss`/`us`/`is` endings are left alone.

use lazy_static::lazy_static;
use std::borrow::Cow;
use std::collections::HashMap;

lazy_static! {
    static ref IRREGULAR: HashMap<&'static str, &'static str> = [
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("oxen", "ox"),
        ("leaves", "leaf"),
        ("wolves", "wolf"),
        ("knives", "knife"),
        ("lives", "life"),
        ("wives", "wife"),
        ("halves", "half"),
        ("shelves", "shelf"),
        ("calves", "calf"),
        ("loaves", "loaf"),
        ("thieves", "thief"),
        ("indices", "index"),
        ("cacti", "cactus"),
        ("fungi", "fungus"),
        ("theses", "thesis"),
        ("analyses", "analysis"),
        ("crises", "crisis"),
        ("hypotheses", "hypothesis"),
        ("parentheses", "parenthesis"),
        ("diagnoses", "diagnosis"),
        ("synopses", "synopsis"),
        ("oases", "oasis"),
    ]
    .into_iter()
    .collect();
}

// Longest suffix first.
const RULES: &[(&str, &str)] = &[
    ("ches", "ch"),
    ("shes", "sh"),
    ("ies", "y"),
    ("xes", "x"),
    ("zes", "z"),
    ("ses", "s"),
    ("s", ""),
];

const KEEP_ENDINGS: &[&str] = &["ss", "us", "is"];

pub fn lemmatize(token: &str) -> Cow<'_, str> {
    if let Some(base) = IRREGULAR.get(token) {
        return Cow::Borrowed(*base);
    }
    if token.chars().count() <= 3 || KEEP_ENDINGS.iter().any(|e| token.ends_with(e)) {
        return Cow::Borrowed(token);
    }
    for (suffix, replacement) in RULES {
        if let Some(stem) = token.strip_suffix(suffix) {
            return Cow::Owned(format!("{stem}{replacement}"));
        }
    }
    Cow::Borrowed(token)
}
