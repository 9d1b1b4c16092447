// src/frequency.rs
//! Term frequency engine: token counts summed over every document of a corpus.
//!
//! Ordering: count descending, ties broken by word ascending (byte order), so two
//! tables built from the same content always list words identically.

use serde::Serialize;
use std::collections::HashMap;

use crate::corpus::{Corpus, GroupLabel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermFrequencyTable {
    label: GroupLabel,
    entries: Vec<TermCount>,
}

impl TermFrequencyTable {
    pub fn label(&self) -> GroupLabel {
        self.label
    }

    /// Sorted entries (count desc, word asc).
    pub fn entries(&self) -> &[TermCount] {
        &self.entries
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_tokens(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn count(&self, word: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.word == word).map(|e| e.count)
    }

    /// `count / distinct words`. The denominator is the number of distinct words in
    /// this table, not the number of token occurrences.
    pub fn ratios(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        let distinct = self.entries.len() as f64;
        self.entries
            .iter()
            .map(move |e| (e.word.as_str(), e.count as f64 / distinct))
    }

    /// Leading `n` entries, e.g. for a word cloud.
    pub fn top(&self, n: usize) -> &[TermCount] {
        &self.entries[..n.min(self.entries.len())]
    }
}

pub fn term_frequency(corpus: &Corpus) -> TermFrequencyTable {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tok in corpus.tokens() {
        *counts.entry(tok).or_insert(0) += 1;
    }

    let mut entries: Vec<TermCount> = counts
        .into_iter()
        .map(|(word, count)| TermCount {
            word: word.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));

    TermFrequencyTable {
        label: corpus.label(),
        entries,
    }
}
