// src/corpus.rs
//! Corpus builder: cleaned answers → lowercase, stopword-free token lists, one per answer.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::ingest::types::OpinionScore;

static DEFAULT_STOPWORDS: Lazy<StopWords> = Lazy::new(|| {
    let raw = include_str!("../lexicon/stopwords.json");
    StopWords::from_json_str(raw).expect("valid stopword list")
});

/// Group a corpus was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupLabel {
    Score(OpinionScore),
    Support,
    Oppose,
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupLabel::Score(s) => write!(f, "{s}"),
            GroupLabel::Support => f.write_str("support"),
            GroupLabel::Oppose => f.write_str("oppose"),
        }
    }
}

impl Serialize for GroupLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fixed set of function words excluded from frequency analysis.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Built-in English list.
    pub fn english() -> Self {
        DEFAULT_STOPWORDS.clone()
    }

    /// Accepts `{"words": [...]}` or a bare JSON array.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Shape {
            Wrapped { words: Vec<String> },
            Bare(Vec<String>),
        }
        let words = match serde_json::from_str::<Shape>(raw).context("parsing stopword list")? {
            Shape::Wrapped { words } | Shape::Bare(words) => words,
        };
        Ok(Self::new(words))
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading stopwords from {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Tokenized documents of one group. Never mutated after `build_corpus`.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    label: GroupLabel,
    documents: Vec<Vec<String>>,
}

impl Corpus {
    pub fn empty(label: GroupLabel) -> Self {
        Self {
            label,
            documents: Vec::new(),
        }
    }

    pub fn label(&self) -> GroupLabel {
        self.label
    }

    pub fn documents(&self) -> &[Vec<String>] {
        &self.documents
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.documents.iter().flatten().map(String::as_str)
    }
}

pub fn build_corpus<S: AsRef<str>>(texts: &[S], label: GroupLabel, stopwords: &StopWords) -> Corpus {
    let documents: Vec<Vec<String>> = texts
        .iter()
        .map(|t| tokenize_document(t.as_ref(), stopwords))
        .collect();

    debug!(
        target: "survey",
        %label,
        documents = documents.len(),
        tokens = documents.iter().map(Vec::len).sum::<usize>(),
        "corpus built"
    );

    Corpus { label, documents }
}

/// Digits, punctuation and symbols are deleted (not replaced by spaces).
fn tokenize_document(text: &str, stopwords: &StopWords) -> Vec<String> {
    static RE_STRIP: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[\d\p{P}\p{S}]").expect("strip regex"));

    let stripped = RE_STRIP.replace_all(text, "");
    stripped
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|w| !stopwords.contains(w))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_empty_corpus() {
        let texts: [&str; 0] = [];
        let c = build_corpus(&texts, GroupLabel::Support, &StopWords::english());
        assert!(c.is_empty());
        assert_eq!(c.label(), GroupLabel::Support);
        assert_eq!(c.tokens().count(), 0);
    }

    #[test]
    fn strips_digits_punctuation_and_stopwords() {
        let sw = StopWords::new(["the", "and", "of"]);
        let c = build_corpus(
            &["The cost   of 2024 war-time TAXES, and $debt"],
            GroupLabel::Oppose,
            &sw,
        );
        assert_eq!(c.documents(), &[vec!["cost", "wartime", "taxes", "debt"]]);
    }

    #[test]
    fn keeps_document_boundaries() {
        let sw = StopWords::english();
        let c = build_corpus(&["jobs matter", "", "the"], GroupLabel::Oppose, &sw);
        assert_eq!(c.len(), 3);
        assert_eq!(c.documents()[0], vec!["jobs", "matter"]);
        assert!(c.documents()[1].is_empty());
        assert!(c.documents()[2].is_empty());
    }

    #[test]
    fn labels_render_for_reports() {
        let four = OpinionScore::new(4).unwrap();
        assert_eq!(GroupLabel::Score(four).to_string(), "4");
        assert_eq!(
            serde_json::to_string(&GroupLabel::Oppose).unwrap(),
            "\"oppose\""
        );
    }

    #[test]
    fn stopwords_parse_both_shapes() {
        let a = StopWords::from_json_str(r#"{"words":["The"," a "]}"#).unwrap();
        let b = StopWords::from_json_str(r#"["the","a",""]"#).unwrap();
        assert!(a.contains("the") && a.contains("a"));
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
    }
}
