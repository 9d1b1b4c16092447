// src/differential.rs
//! Differential word frequency between the oppose and support groups.
//!
//! Each table is normalized by its own distinct-word count, oppose ratios are
//! negated, and both sides are summed per word. Positive `diff` leans support,
//! negative leans oppose.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::frequency::TermFrequencyTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferentialEntry {
    pub word: String,
    pub diff: f64,
}

/// Every word of either table with its summed signed ratio, sorted by `diff`
/// descending (ties: word ascending).
pub fn merged_differences(
    oppose: &TermFrequencyTable,
    support: &TermFrequencyTable,
) -> Vec<DifferentialEntry> {
    let mut merged: BTreeMap<&str, f64> = BTreeMap::new();
    for (word, ratio) in oppose.ratios() {
        *merged.entry(word).or_insert(0.0) -= ratio;
    }
    for (word, ratio) in support.ratios() {
        *merged.entry(word).or_insert(0.0) += ratio;
    }

    let mut entries: Vec<DifferentialEntry> = merged
        .into_iter()
        .map(|(word, diff)| DifferentialEntry {
            word: word.to_string(),
            diff,
        })
        .collect();
    entries.sort_by(|a, b| b.diff.total_cmp(&a.diff).then_with(|| a.word.cmp(&b.word)));
    entries
}

/// Top `pos_count` (most support-leaning) followed by bottom `neg_count` (most
/// oppose-leaning) entries, descending within each slice. When the two slices
/// would overlap, each word is emitted once.
pub fn diff_frequency(
    oppose: &TermFrequencyTable,
    support: &TermFrequencyTable,
    neg_count: usize,
    pos_count: usize,
) -> Vec<DifferentialEntry> {
    let mut entries = merged_differences(oppose, support);
    let len = entries.len();

    let top_end = pos_count.min(len);
    let bottom_start = len.saturating_sub(neg_count).max(top_end);

    debug!(
        target: "survey",
        merged = len,
        kept_top = top_end,
        kept_bottom = len - bottom_start,
        "differential computed"
    );

    entries.drain(top_end..bottom_start);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{build_corpus, GroupLabel, StopWords};
    use crate::frequency::term_frequency;

    fn table(label: GroupLabel, texts: &[&str]) -> TermFrequencyTable {
        term_frequency(&build_corpus(texts, label, &StopWords::default()))
    }

    fn words(v: &[DifferentialEntry]) -> Vec<&str> {
        v.iter().map(|e| e.word.as_str()).collect()
    }

    #[test]
    fn ranks_support_words_first_and_oppose_words_last() {
        let support = table(GroupLabel::Support, &["jobs jobs growth"]);
        let oppose = table(GroupLabel::Oppose, &["war war war jobs"]);
        let all = merged_differences(&oppose, &support);
        // support: jobs 2/2=1.0, growth 0.5; oppose: war 3/2=1.5, jobs 0.5
        assert_eq!(words(&all), vec!["growth", "jobs", "war"]);
        assert!((all[0].diff - 0.5).abs() < 1e-12);
        assert!((all[1].diff - 0.5).abs() < 1e-12);
        assert!((all[2].diff + 1.5).abs() < 1e-12);
    }

    #[test]
    fn one_sided_empty_passes_other_side_through() {
        let empty = table(GroupLabel::Oppose, &[]);
        let support = table(GroupLabel::Support, &["peace peace trade"]);
        let out = diff_frequency(&empty, &support, 5, 5);
        assert_eq!(words(&out), vec!["peace", "trade"]);
        assert!((out[0].diff - 1.0).abs() < 1e-12);

        let out = diff_frequency(&support, &empty, 5, 5);
        assert!(out.iter().all(|e| e.diff < 0.0));
    }

    #[test]
    fn both_empty_is_empty() {
        let a = table(GroupLabel::Oppose, &[]);
        let b = table(GroupLabel::Support, &[]);
        assert!(diff_frequency(&a, &b, 3, 3).is_empty());
    }

    #[test]
    fn keeps_requested_extremes_without_duplicates() {
        let support = table(GroupLabel::Support, &["a a a a b b b c c"]);
        let oppose = table(GroupLabel::Oppose, &["x x x y y z"]);
        let out = diff_frequency(&oppose, &support, 2, 1);
        assert_eq!(words(&out), vec!["a", "y", "x"]);

        let out = diff_frequency(&oppose, &support, 10, 10);
        assert_eq!(out.len(), 6);
    }
}
