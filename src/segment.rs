// src/segment.rs
//! Segmentation of filtered responses by opinion score.

use std::collections::BTreeMap;

use crate::corpus::GroupLabel;
use crate::ingest::types::{OpinionScore, Response};

/// Five disjoint score buckets (each present, maybe empty) plus the merged
/// support (4 ∪ 5) and oppose (1 ∪ 2) groups. Bucket 3 is only available per score.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    buckets: BTreeMap<OpinionScore, Vec<&'a Response>>,
    support: Vec<&'a Response>,
    oppose: Vec<&'a Response>,
}

impl<'a> Segments<'a> {
    pub fn bucket(&self, score: OpinionScore) -> &[&'a Response] {
        self.buckets.get(&score).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn support(&self) -> &[&'a Response] {
        &self.support
    }

    pub fn oppose(&self) -> &[&'a Response] {
        &self.oppose
    }

    pub fn group(&self, label: GroupLabel) -> &[&'a Response] {
        match label {
            GroupLabel::Score(s) => self.bucket(s),
            GroupLabel::Support => self.support(),
            GroupLabel::Oppose => self.oppose(),
        }
    }

    /// Cleaned texts of a group, in index order.
    pub fn cleaned_texts(&self, label: GroupLabel) -> Vec<&'a str> {
        self.group(label)
            .iter()
            .map(|r| r.cleaned_text.as_str())
            .collect()
    }

    /// Every label: the five scores, then support and oppose.
    pub fn labels() -> impl Iterator<Item = GroupLabel> {
        OpinionScore::ALL
            .into_iter()
            .map(GroupLabel::Score)
            .chain([GroupLabel::Support, GroupLabel::Oppose])
    }
}

pub fn segment(responses: &[Response]) -> Segments<'_> {
    let mut buckets: BTreeMap<OpinionScore, Vec<&Response>> =
        OpinionScore::ALL.into_iter().map(|s| (s, Vec::new())).collect();
    for r in responses {
        buckets.entry(r.opinion_score).or_default().push(r);
    }
    for b in buckets.values_mut() {
        b.sort_by_key(|r| r.index);
    }

    let union = |pick: fn(OpinionScore) -> bool| {
        let mut merged: Vec<&Response> = buckets
            .iter()
            .filter(|(s, _)| pick(**s))
            .flat_map(|(_, rs)| rs.iter().copied())
            .collect();
        merged.sort_by_key(|r| r.index);
        merged
    };
    let support = union(OpinionScore::is_support);
    let oppose = union(OpinionScore::is_oppose);

    Segments {
        buckets,
        support,
        oppose,
    }
}
