// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod debug;
pub mod metrics;

// Analysis core, leaves first.
pub mod normalize;
pub mod corpus;
pub mod frequency;
pub mod differential;
pub mod sentiment;
pub mod segment;

pub mod ingest;
pub mod report;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::corpus::{build_corpus, Corpus, GroupLabel, StopWords};
pub use crate::differential::{diff_frequency, DifferentialEntry};
pub use crate::frequency::{term_frequency, TermCount, TermFrequencyTable};
pub use crate::ingest::types::{OpinionScore, RawOpinion, RawRow, Response, ResponseIndex};
pub use crate::ingest::{ingest, Ingested, OriginalTexts};
pub use crate::normalize::{normalize, DictionaryLemmatizer, IdentityLemmatizer, Lemmatizer};
pub use crate::report::{AnalysisSettings, SurveyAnalyzer, SurveyReport};
pub use crate::segment::{segment, Segments};
pub use crate::sentiment::{Lexicon, SentimentAnalyzer, SentimentRanking, SentimentRecord};
