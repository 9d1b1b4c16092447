// src/ingest/mod.rs
pub mod types;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::debug::{answer_fingerprint, LogMode};
use crate::ingest::types::{RawRow, Response, ResponseIndex};
use crate::normalize::{normalize, Lemmatizer};

/// Leading dataset rows that are always header/artifact rows.
pub const HEADER_ROWS: usize = 2;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("survey_rows_total", "Data rows received (header rows excluded).");
        describe_counter!(
            "survey_rows_kept_total",
            "Rows kept after filtering + normalization."
        );
        describe_counter!(
            "survey_rows_excluded_total",
            "Rows excluded for blank text or an invalid opinion score."
        );
        describe_gauge!("survey_yield_pct", "Kept / received rows of the last ingest, in percent.");
    });
}

/// Unmodified text of every data row that had text, keyed by response index.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OriginalTexts {
    by_index: BTreeMap<ResponseIndex, String>,
}

impl OriginalTexts {
    pub fn lookup_original(&self, index: ResponseIndex) -> Option<&str> {
        self.by_index.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IngestStats {
    /// Data rows after the header rows were dropped.
    pub total_rows: usize,
    pub kept: usize,
    pub excluded: usize,
    pub yield_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ingested {
    pub responses: Vec<Response>,
    pub originals: OriginalTexts,
    pub stats: IngestStats,
}

/// `round(kept / total * 100, 3)`; 0 when nothing was received.
pub fn compute_yield(total: usize, kept: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = kept as f64 / total as f64 * 100.0;
    (pct * 1000.0).round() / 1000.0
}

/// Drops the header rows, keeps originals for back-lookup, filters incomplete rows
/// and normalizes the rest. Indices are positions in `rows`, header rows included.
pub fn ingest(rows: Vec<RawRow>, lemmatizer: &dyn Lemmatizer) -> Ingested {
    ensure_metrics_described();

    let mut responses = Vec::new();
    let mut originals = BTreeMap::new();
    let mut total_rows = 0usize;
    let dev_log = LogMode::from_env().dev;

    for (pos, row) in rows.into_iter().enumerate().skip(HEADER_ROWS) {
        total_rows += 1;
        let index = ResponseIndex(pos);

        let Some(text) = row.text.filter(|t| !t.trim().is_empty()) else {
            debug!(target: "survey", %index, "excluded: blank text");
            continue;
        };
        originals.insert(index, text.clone());

        let Some(opinion_score) = row.opinion.as_ref().and_then(|o| o.parse()) else {
            debug!(target: "survey", %index, "excluded: opinion not in 1..=5");
            continue;
        };

        let Some(cleaned_text) = normalize(&text, lemmatizer) else {
            debug!(target: "survey", %index, "excluded: empty after normalization");
            continue;
        };

        if dev_log {
            debug!(target: "survey", %index, id = %answer_fingerprint(&text), %opinion_score, "kept");
        }

        responses.push(Response {
            index,
            raw_text: text,
            opinion_score,
            cleaned_text,
        });
    }

    let kept = responses.len();
    let excluded = total_rows - kept;
    let yield_pct = compute_yield(total_rows, kept);

    counter!("survey_rows_total").increment(total_rows as u64);
    counter!("survey_rows_kept_total").increment(kept as u64);
    counter!("survey_rows_excluded_total").increment(excluded as u64);
    gauge!("survey_yield_pct").set(yield_pct);

    info!(target: "survey", total_rows, kept, excluded, yield_pct, "ingest finished");

    Ingested {
        responses,
        originals: OriginalTexts { by_index: originals },
        stats: IngestStats {
            total_rows,
            kept,
            excluded,
            yield_pct,
        },
    }
}
