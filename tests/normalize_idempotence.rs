// tests/normalize_idempotence.rs
use survey_sentiment_analyzer::{normalize, DictionaryLemmatizer, IdentityLemmatizer};

const SAMPLES: &[&str] = &[
    "I love the economy and allies",
    "Don't do it!!! It's a mistake.",
    "They were\r\nwalking<br>to the   border… why?",
    "Prices went UP; taxes rose. Families are worried",
    "‘Quoted’ answer — with dashes",
    "12 children, 3 wars",
];

#[test]
fn normalize_is_idempotent_with_builtin_dictionary() {
    let lem = DictionaryLemmatizer::english();
    for t in SAMPLES {
        let once = normalize(t, &lem).expect("non-empty sample");
        let twice = normalize(&once, &lem).expect("still non-empty");
        assert_eq!(once, twice, "not idempotent for {t:?}");
    }
}

#[test]
fn output_has_single_spaces_and_no_terminal_marks() {
    let lem = DictionaryLemmatizer::english();
    for t in SAMPLES {
        let out = normalize(t, &lem).unwrap();
        assert!(!out.contains("  "), "{out:?}");
        assert!(!out.contains(['.', '?', '!', '\'', '’', '\n']), "{out:?}");
        assert_eq!(out.trim(), out);
    }
}

#[test]
fn markup_breaks_become_spaces() {
    let out = normalize("first<BR />second<br>third", &IdentityLemmatizer).unwrap();
    assert_eq!(out, "first second third");
}

#[test]
fn unknown_tokens_pass_through() {
    let lem = DictionaryLemmatizer::english();
    assert_eq!(
        normalize("Zorblax quux walking", &lem).as_deref(),
        Some("Zorblax quux walk")
    );
}

#[test]
fn stripped_marks_never_leave_a_break_behind() {
    let lem = DictionaryLemmatizer::english();
    for t in ["a <b'r> b", "x<br.>y", "<br!>", "one<br<br>>two", "<b’r/>end"] {
        let once = normalize(t, &lem);
        if let Some(cleaned) = &once {
            assert_eq!(normalize(cleaned, &lem), once, "not idempotent for {t:?}");
            assert!(!cleaned.to_lowercase().contains("<br"), "{cleaned:?}");
        }
    }
    assert_eq!(normalize("a <b'r> b", &lem).as_deref(), Some("a b"));
    assert_eq!(normalize("<br!>", &lem), None);
}
