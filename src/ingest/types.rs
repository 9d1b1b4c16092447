// src/ingest/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable key of a survey row, assigned once at ingestion (position in the source dataset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseIndex(pub usize);

impl fmt::Display for ResponseIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Likert opinion score, always in 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct OpinionScore(u8);

impl OpinionScore {
    pub const ALL: [OpinionScore; 5] = [
        OpinionScore(1),
        OpinionScore(2),
        OpinionScore(3),
        OpinionScore(4),
        OpinionScore(5),
    ];

    pub fn new(value: u8) -> Option<Self> {
        (1..=5).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// 4 or 5.
    pub fn is_support(self) -> bool {
        self.0 >= 4
    }

    /// 1 or 2.
    pub fn is_oppose(self) -> bool {
        self.0 <= 2
    }

    /// Accepts integral numbers only; `4.0` is fine, `4.5` is not.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value.fract() != 0.0 || !(1.0..=5.0).contains(&value) {
            return None;
        }
        Self::new(value as u8)
    }
}

impl fmt::Display for OpinionScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opinion cell as it arrives from the tabular source: a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawOpinion {
    Number(f64),
    Text(String),
}

impl RawOpinion {
    pub fn parse(&self) -> Option<OpinionScore> {
        match self {
            RawOpinion::Number(n) => OpinionScore::from_f64(*n),
            RawOpinion::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(OpinionScore::from_f64),
        }
    }
}

/// One row of the survey dataset (free text + opinion), before any filtering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, alias = "score")]
    pub opinion: Option<RawOpinion>,
}

impl RawRow {
    pub fn new(text: impl Into<String>, opinion: u8) -> Self {
        Self {
            text: Some(text.into()),
            opinion: Some(RawOpinion::Number(f64::from(opinion))),
        }
    }
}

/// A response that survived filtering and normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub index: ResponseIndex,
    pub raw_text: String,
    pub opinion_score: OpinionScore,
    pub cleaned_text: String,
}
