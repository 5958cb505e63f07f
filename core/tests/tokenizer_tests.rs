use imgsearch_core::tokenizer::normalize;

#[test]
fn it_normalizes_and_stems() {
    let words = normalize("Running Runners RUN! The ﬁeld's edge.");
    assert!(words.contains(&"run".to_string()));
    // NFKC folds the ligature
    assert_eq!(normalize("ﬁeld"), normalize("field"));
}

#[test]
fn it_filters_stopwords() {
    let words = normalize("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert_eq!(words.len(), 5);
}

#[test]
fn it_lemmatizes_before_stemming() {
    assert_eq!(normalize("mice"), normalize("mouse"));
    assert_eq!(normalize("children"), normalize("child"));
    assert_eq!(normalize("bicycles"), normalize("bicycle"));
    assert_eq!(normalize("puppies"), normalize("puppy"));
}

#[test]
fn it_is_deterministic_and_idempotent() {
    let inputs = [
        "Two children riding red bicycles near the beaches",
        "A man holding puppies in the garden",
        "Cars parked on a busy street at night",
        "",
        "the of and",
        "Theses and analyses of the crises",
    ];
    for input in inputs {
        let once = normalize(input);
        assert_eq!(once, normalize(input));
        assert_eq!(normalize(&once.join(" ")), once, "input: {input}");
    }
}

#[test]
fn it_never_reduces_a_plural_to_a_stopword() {
    for word in ["theses", "analyses", "crises", "hypotheses"] {
        let once = normalize(word);
        assert_eq!(once.len(), 1, "{word}");
        assert_eq!(normalize(&once[0]), once, "{word}");
    }
    assert_eq!(normalize("theses"), normalize("thesis"));
}
