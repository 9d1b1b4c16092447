//! # Survey Report
//! Pure pipeline that maps raw survey rows → `SurveyReport`.
//! No I/O, suitable for unit tests and offline runs.
//!
//! Order: ingest (drop header rows, filter, normalize) → segment by score →
//! corpus + term frequency per group → support vs oppose differential;
//! independently, sentiment ranking over the cleaned texts.

use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::config::AnalysisConfig;
use crate::corpus::{build_corpus, GroupLabel, StopWords};
use crate::differential::{diff_frequency, DifferentialEntry};
use crate::frequency::{term_frequency, TermCount, TermFrequencyTable};
use crate::ingest::types::{RawRow, ResponseIndex};
use crate::ingest::{ingest, IngestStats, OriginalTexts};
use crate::normalize::{normalize, DictionaryLemmatizer, Lemmatizer};
use crate::segment::{segment, Segments};
use crate::sentiment::{SentimentAnalyzer, SentimentRecord};

/// Knobs of one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisSettings {
    pub neg_count: usize,
    pub pos_count: usize,
    pub top_k: usize,
    pub word_cloud_max_words: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self::from(&AnalysisConfig::default())
    }
}

impl From<&AnalysisConfig> for AnalysisSettings {
    fn from(cfg: &AnalysisConfig) -> Self {
        Self {
            neg_count: cfg.differential.neg_count,
            pos_count: cfg.differential.pos_count,
            top_k: cfg.ranking.top_k,
            word_cloud_max_words: cfg.word_cloud.max_words,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub label: GroupLabel,
    pub responses: usize,
    pub distinct_words: usize,
    /// `(word, count)` pairs, most frequent first, capped for word clouds.
    pub words: Vec<TermCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResponse {
    pub index: ResponseIndex,
    /// Original answer, before normalization.
    pub text: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyReport {
    pub yield_pct: f64,
    pub stats: IngestStats,
    pub settings: AnalysisSettings,
    pub groups: Vec<GroupSummary>,
    pub differential: Vec<DifferentialEntry>,
    pub most_negative: Vec<RankedResponse>,
    pub most_positive: Vec<RankedResponse>,
}

/// Everything the pipeline needs, shared read-only across requests.
#[derive(Clone)]
pub struct SurveyAnalyzer {
    lemmatizer: Arc<dyn Lemmatizer>,
    stopwords: Arc<StopWords>,
    sentiment: SentimentAnalyzer,
    settings: AnalysisSettings,
}

impl Default for SurveyAnalyzer {
    fn default() -> Self {
        Self::new(
            Arc::new(DictionaryLemmatizer::english()),
            StopWords::english(),
            SentimentAnalyzer::new(),
            AnalysisSettings::default(),
        )
    }
}

impl SurveyAnalyzer {
    pub fn new(
        lemmatizer: Arc<dyn Lemmatizer>,
        stopwords: StopWords,
        sentiment: SentimentAnalyzer,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            lemmatizer,
            stopwords: Arc::new(stopwords),
            sentiment,
            settings,
        }
    }

    /// Builds the analyzer from config, loading any resource overrides.
    pub fn from_config(cfg: &AnalysisConfig) -> anyhow::Result<Self> {
        let lemmatizer = cfg.resources.lemmatizer()?;
        let stopwords = cfg.resources.stopwords()?;
        let sentiment = match cfg.resources.lexicon()? {
            Some(lex) => SentimentAnalyzer::with_lexicon(lex),
            None => SentimentAnalyzer::new(),
        };
        Ok(Self::new(
            Arc::new(lemmatizer),
            stopwords,
            sentiment,
            AnalysisSettings::from(cfg),
        ))
    }

    pub fn with_settings(mut self, settings: AnalysisSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> AnalysisSettings {
        self.settings
    }

    pub fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }

    pub fn sentiment(&self) -> &SentimentAnalyzer {
        &self.sentiment
    }

    pub fn normalize(&self, text: &str) -> Option<String> {
        normalize(text, self.lemmatizer.as_ref())
    }

    /// Term frequency table of one group.
    pub fn group_table(&self, segments: &Segments<'_>, label: GroupLabel) -> TermFrequencyTable {
        let texts = segments.cleaned_texts(label);
        term_frequency(&build_corpus(&texts, label, &self.stopwords))
    }

    fn summarize(
        &self,
        segments: &Segments<'_>,
        label: GroupLabel,
        table: &TermFrequencyTable,
    ) -> GroupSummary {
        GroupSummary {
            label,
            responses: segments.group(label).len(),
            distinct_words: table.len(),
            words: table.top(self.settings.word_cloud_max_words).to_vec(),
        }
    }

    pub fn analyze(&self, rows: Vec<RawRow>) -> SurveyReport {
        let ingested = ingest(rows, self.lemmatizer.as_ref());
        let segments = segment(&ingested.responses);

        let mut groups = Vec::new();
        let (mut support_table, mut oppose_table) = (None, None);
        for label in Segments::labels() {
            let table = self.group_table(&segments, label);
            groups.push(self.summarize(&segments, label, &table));
            match label {
                GroupLabel::Support => support_table = Some(table),
                GroupLabel::Oppose => oppose_table = Some(table),
                GroupLabel::Score(_) => {}
            }
        }
        let support_table =
            support_table.unwrap_or_else(|| self.group_table(&segments, GroupLabel::Support));
        let oppose_table =
            oppose_table.unwrap_or_else(|| self.group_table(&segments, GroupLabel::Oppose));

        let differential = diff_frequency(
            &oppose_table,
            &support_table,
            self.settings.neg_count,
            self.settings.pos_count,
        );

        let ranking = self.sentiment.rank_responses(&ingested.responses);
        let k = self.settings.top_k;
        let most_negative = attach_originals(ranking.most_negative(k), &ingested.originals);
        let most_positive = attach_originals(&ranking.most_positive(k), &ingested.originals);

        info!(
            target: "survey",
            kept = ingested.stats.kept,
            support = support_table.len(),
            oppose = oppose_table.len(),
            differential = differential.len(),
            "report built"
        );

        SurveyReport {
            yield_pct: ingested.stats.yield_pct,
            stats: ingested.stats,
            settings: self.settings,
            groups,
            differential,
            most_negative,
            most_positive,
        }
    }
}

fn attach_originals(records: &[SentimentRecord], originals: &OriginalTexts) -> Vec<RankedResponse> {
    records
        .iter()
        .map(|r| RankedResponse {
            index: r.index,
            text: originals
                .lookup_original(r.index)
                .unwrap_or_default()
                .to_string(),
            score: r.score,
        })
        .collect()
}
