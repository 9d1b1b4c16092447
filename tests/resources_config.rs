// tests/resources_config.rs
//
// Vocabularies are injected data: controlled fixtures replace the embedded lists.

use std::fs;

use survey_sentiment_analyzer::config::AnalysisConfig;
use survey_sentiment_analyzer::{RawRow, SurveyAnalyzer};

#[test]
fn config_file_overrides_vocabularies_and_counts() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("stop.json"), r#"["i", "the", "and", "economy"]"#).unwrap();
    fs::write(
        dir.path().join("lex.json"),
        r#"{"valence": {"allies": 5.0, "strikes": -5.0}, "negators": [], "boosters": {}}"#,
    )
    .unwrap();
    fs::write(dir.path().join("lemmas.json"), r#"{"allies": "ally"}"#).unwrap();
    let cfg_path = dir.path().join("analysis.toml");
    fs::write(
        &cfg_path,
        r#"
[differential]
neg_count = 1
pos_count = 1

[ranking]
top_k = 1

[resources]
stopwords = "stop.json"
lexicon = "lex.json"
lemmas = "lemmas.json"
"#,
    )
    .unwrap();

    let cfg = AnalysisConfig::load_from(&cfg_path).unwrap();
    let analyzer = SurveyAnalyzer::from_config(&cfg).unwrap();
    let report = analyzer.analyze(vec![
        RawRow::default(),
        RawRow::default(),
        RawRow::new("I love the economy and allies", 5),
        RawRow::new("I fear war and strikes", 1),
    ]);

    let words: Vec<&str> = report.differential.iter().map(|e| e.word.as_str()).collect();
    // "economy" is a stopword here; "allies" is lemmatized
    assert_eq!(words.len(), 2);
    assert_eq!(words[0], "ally");
    assert!(!words.contains(&"economy"));

    // "ally" is not in the fixture lexicon, so the support answer scores 0
    assert_eq!(report.most_positive[0].score, 0.0);
    assert_eq!(report.most_negative[0].score, -5.0);
}

#[test]
fn missing_resource_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("analysis.json");
    fs::write(&cfg_path, r#"{"resources": {"lexicon": "nope.json"}}"#).unwrap();
    let cfg = AnalysisConfig::load_from(&cfg_path).unwrap();
    let err = SurveyAnalyzer::from_config(&cfg).err().expect("should fail");
    assert!(format!("{err:#}").contains("nope.json"));
}
