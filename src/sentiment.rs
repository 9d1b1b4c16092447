use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::ingest::types::{Response, ResponseIndex};

static LEXICON: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    let raw = include_str!("../lexicon/sentiment_lexicon.json");
    Arc::new(Lexicon::from_json_str(raw).expect("valid sentiment lexicon"))
});

/// Valence lexicon plus the negators and intensifiers the scorer reacts to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    valence: HashMap<String, f64>,
    #[serde(default)]
    negators: HashSet<String>,
    #[serde(default)]
    boosters: HashMap<String, f64>,
}

impl Lexicon {
    pub fn new(valence: HashMap<String, f64>) -> Self {
        Self {
            valence,
            ..Self::default()
        }
    }

    pub fn with_negators<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.negators = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_boosters(mut self, boosters: HashMap<String, f64>) -> Self {
        self.boosters = boosters;
        self
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("parsing sentiment lexicon")
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading sentiment lexicon from {}", path.display()))?;
        Self::from_json_str(&raw)
    }

    /// Valence of a lowercase token, 0 when unknown.
    #[inline]
    pub fn valence(&self, w: &str) -> f64 {
        self.valence.get(w).copied().unwrap_or(0.0)
    }

    fn is_negator(&self, w: &str) -> bool {
        self.negators.contains(w)
    }

    fn boost(&self, w: &str) -> Option<f64> {
        self.boosters.get(w).copied()
    }

    pub fn len(&self) -> usize {
        self.valence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valence.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: Arc<Lexicon>,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    /// Analyzer over the built-in English lexicon.
    pub fn new() -> Self {
        Self {
            lexicon: Arc::clone(&LEXICON),
        }
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Returns (score, token count).
    ///
    /// Score is the sum of token valences. A negator within the previous 1..=3
    /// tokens flips the sign of a valenced token; a booster directly in front of
    /// it scales it by `1 + boost`.
    pub fn score_text(&self, text: &str) -> (f64, usize) {
        // Collected because negation looks back over earlier tokens.
        let tokens: Vec<String> = tokenize(text).collect();
        let mut score = 0.0f64;

        for i in 0..tokens.len() {
            let base = self.lexicon.valence(&tokens[i]);
            if base == 0.0 {
                continue;
            }

            let mut adj = base;
            if i >= 1 {
                if let Some(b) = self.lexicon.boost(&tokens[i - 1]) {
                    adj *= 1.0 + b;
                }
            }
            let negated = (1..=3).any(|k| i >= k && self.lexicon.is_negator(&tokens[i - k]));
            if negated {
                adj = -adj;
            }
            score += adj;
        }

        (score, tokens.len())
    }

    pub fn sentiment_score(&self, text: &str) -> f64 {
        self.score_text(text).0
    }

    /// Scores the cleaned (lemmatized, not stopword-filtered) text of every response.
    pub fn rank_responses(&self, responses: &[Response]) -> SentimentRanking {
        let records = responses
            .iter()
            .map(|r| SentimentRecord {
                index: r.index,
                score: self.sentiment_score(&r.cleaned_text),
            })
            .collect();
        SentimentRanking::new(records)
    }
}

/// Alphanumeric tokens, lowercased.
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentRecord {
    pub index: ResponseIndex,
    pub score: f64,
}

/// Records sorted by score ascending; equal scores fall back to index ascending,
/// so the order does not depend on input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SentimentRanking {
    records: Vec<SentimentRecord>,
}

impl SentimentRanking {
    pub fn new(mut records: Vec<SentimentRecord>) -> Self {
        records.sort_by(|a, b| a.score.total_cmp(&b.score).then_with(|| a.index.cmp(&b.index)));
        Self { records }
    }

    pub fn records(&self) -> &[SentimentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The `k` lowest scores, most negative first.
    pub fn most_negative(&self, k: usize) -> &[SentimentRecord] {
        &self.records[..k.min(self.records.len())]
    }

    /// The `k` highest scores, most positive first.
    pub fn most_positive(&self, k: usize) -> Vec<SentimentRecord> {
        self.records.iter().rev().take(k).copied().collect()
    }
}
