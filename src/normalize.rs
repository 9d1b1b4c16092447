// src/normalize.rs
//! Text normalizer: strips line breaks, apostrophes and sentence-terminal marks,
//! then reduces each whitespace token to its dictionary base form.
//!
//! Sentence punctuation is removed so that a single answer is never split into
//! several sentences by downstream tokenizers.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

static DEFAULT_LEMMAS: Lazy<DictionaryLemmatizer> = Lazy::new(|| {
    let raw = include_str!("../lexicon/lemmas.json");
    DictionaryLemmatizer::from_json_str(raw).expect("valid lemma dictionary")
});

/// `token -> base form` lookup. Tokens without a known base form come back unchanged.
pub trait Lemmatizer: Send + Sync {
    fn lemma<'a>(&'a self, token: &'a str) -> &'a str;
}

/// Pass-through lemmatizer, handy for fixtures.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLemmatizer;

impl Lemmatizer for IdentityLemmatizer {
    fn lemma<'a>(&'a self, token: &'a str) -> &'a str {
        token
    }
}

/// Dictionary-backed lemmatizer.
///
/// Chains (`a -> b`, `b -> c`) are resolved when the dictionary is built, so every
/// returned base form is a fixed point of the lookup. Entries that end in a cycle,
/// or whose base form would itself be altered by normalization, are dropped.
#[derive(Debug, Clone, Default)]
pub struct DictionaryLemmatizer {
    forms: HashMap<String, String>,
}

impl DictionaryLemmatizer {
    pub fn new(forms: HashMap<String, String>) -> Self {
        let forms: HashMap<String, String> = forms
            .into_iter()
            .filter(|(form, base)| form != base && is_stable_base(base))
            .collect();

        let mut resolved = HashMap::with_capacity(forms.len());
        for (form, base) in &forms {
            let mut current = base;
            let mut steps = 0;
            while let Some(next) = lookup(&forms, current) {
                steps += 1;
                if steps > forms.len() {
                    break;
                }
                current = next;
            }
            if lookup(&forms, current).is_none() {
                resolved.insert(form.clone(), current.clone());
            }
        }
        Self { forms: resolved }
    }

    /// Built-in English dictionary (irregular forms plus common inflections).
    pub fn english() -> Self {
        DEFAULT_LEMMAS.clone()
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let forms: HashMap<String, String> =
            serde_json::from_str(raw).context("parsing lemma dictionary")?;
        Ok(Self::new(forms))
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading lemma dictionary from {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn lemma<'a>(&'a self, token: &'a str) -> &'a str {
        lookup(&self.forms, token).map_or(token, String::as_str)
    }
}

// Exact key first, then the lowercased token.
fn lookup<'m>(forms: &'m HashMap<String, String>, token: &str) -> Option<&'m String> {
    forms.get(token).or_else(|| {
        token
            .chars()
            .any(char::is_uppercase)
            .then(|| forms.get(&token.to_lowercase()))
            .flatten()
    })
}

fn is_stable_base(base: &str) -> bool {
    !base.is_empty()
        && !base
            .chars()
            .any(|c| c.is_whitespace() || is_stripped_mark(c) || c == '<' || c == '>')
}

fn is_stripped_mark(c: char) -> bool {
    matches!(c, '\'' | '\u{2018}' | '\u{2019}' | '.' | '?' | '!')
}

/// Clean and lemmatize one response. `None` when nothing is left.
pub fn normalize(text: &str, lemmatizer: &dyn Lemmatizer) -> Option<String> {
    let flat = strip_breaks_and_marks(text);

    let cleaned = flat
        .split_whitespace()
        .map(|tok| lemmatizer.lemma(tok))
        .collect::<Vec<_>>()
        .join(" ");

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Breaks to spaces, then marks removed, repeated until neither pass changes the
/// text. Removing a mark can assemble a new `<br>` (`<b'r>`), and replacing a
/// break can complete an outer one (`<br<br>>`).
fn strip_breaks_and_marks(text: &str) -> String {
    static RE_BREAKS: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)\r\n|\n|\r|<br\s*/?>").expect("line break regex"));

    let mut current = text.to_string();
    loop {
        let flat = RE_BREAKS.replace_all(&current, " ");
        let stripped: String = flat.chars().filter(|c| !is_stripped_mark(*c)).collect();
        if stripped == current {
            return current;
        }
        current = stripped;
    }
}
