// tests/sentiment_ranking.rs
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use survey_sentiment_analyzer::{
    ingest, DictionaryLemmatizer, OpinionScore, RawRow, Response, ResponseIndex,
    SentimentAnalyzer,
};

fn response(index: usize, cleaned: &str) -> Response {
    Response {
        index: ResponseIndex(index),
        raw_text: cleaned.to_string(),
        opinion_score: OpinionScore::new(3).unwrap(),
        cleaned_text: cleaned.to_string(),
    }
}

fn sample() -> Vec<Response> {
    vec![
        response(2, "I love this plan it be great"),
        response(3, "war and death everywhere terrible"),
        response(4, "no opinion"),
        response(5, "good"),
        response(6, "good"),
        response(7, "I be afraid and angry"),
        response(8, "it be not good"),
        response(9, "a very wonderful and peaceful future"),
        response(10, "meh"),
    ]
}

fn ids(records: &[survey_sentiment_analyzer::SentimentRecord]) -> Vec<usize> {
    records.iter().map(|r| r.index.0).collect()
}

#[test]
fn ranking_is_ascending() {
    let ranking = SentimentAnalyzer::new().rank_responses(&sample());
    assert_eq!(ranking.len(), 9);
    for w in ranking.records().windows(2) {
        assert!(w[0].score <= w[1].score);
    }
    assert_eq!(ranking.most_negative(1)[0].index, ResponseIndex(3));
    assert!(ranking.most_positive(1)[0].score > 0.0);
}

#[test]
fn top_k_is_stable_under_permutation() {
    let analyzer = SentimentAnalyzer::new();
    let base = analyzer.rank_responses(&sample());
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let mut shuffled = sample();
        shuffled.shuffle(&mut rng);
        let r = analyzer.rank_responses(&shuffled);
        assert_eq!(ids(r.records()), ids(base.records()));
        assert_eq!(ids(r.most_negative(3)), ids(base.most_negative(3)));
        assert_eq!(ids(&r.most_positive(3)), ids(&base.most_positive(3)));
    }
}

#[test]
fn equal_scores_break_ties_by_index() {
    let ranking = SentimentAnalyzer::new().rank_responses(&sample());
    let pos: Vec<usize> = ids(ranking.records())
        .into_iter()
        .filter(|i| *i == 5 || *i == 6)
        .collect();
    assert_eq!(pos, vec![5, 6]);
}

#[test]
fn scores_use_unfiltered_text_and_lookup_returns_originals() {
    let mut rows = vec![RawRow::default(), RawRow::default()];
    rows.push(RawRow::new("It is NOT good.", 2));
    rows.push(RawRow::new("Truly wonderful!", 4));
    let ingested = ingest(rows, &DictionaryLemmatizer::english());

    let ranking = SentimentAnalyzer::new().rank_responses(&ingested.responses);
    let worst = ranking.most_negative(1)[0];
    // "not" is a stopword, yet negation still applies to sentiment
    assert!(worst.score < 0.0);
    assert_eq!(
        ingested.originals.lookup_original(worst.index),
        Some("It is NOT good.")
    );
    let best = ranking.most_positive(1)[0];
    assert_eq!(ingested.originals.lookup_original(best.index), Some("Truly wonderful!"));
}
