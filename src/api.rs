use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::config::AnalysisConfig;
use crate::ingest::types::RawRow;
use crate::report::{SurveyAnalyzer, SurveyReport};

#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<SurveyAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: SurveyAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }

    /// Analyzer configured from `$SURVEY_CONFIG_PATH` / `config/analysis.*` / defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let cfg = AnalysisConfig::load_default()?;
        Ok(Self::new(SurveyAnalyzer::from_config(&cfg)?))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/normalize", post(normalize))
        .route("/score", post(score))
        .route("/analyze", post(analyze))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct TextReq {
    text: String,
}

#[derive(serde::Serialize)]
struct NormalizeResp {
    cleaned: Option<String>,
}

#[derive(serde::Serialize)]
struct ScoreResp {
    cleaned: Option<String>,
    score: f64,
    tokens_count: usize,
}

async fn normalize(State(state): State<AppState>, Json(body): Json<TextReq>) -> Json<NormalizeResp> {
    Json(NormalizeResp {
        cleaned: state.analyzer.normalize(&body.text),
    })
}

// Scored on the cleaned text, as in the batch pipeline.
async fn score(State(state): State<AppState>, Json(body): Json<TextReq>) -> Json<ScoreResp> {
    let cleaned = state.analyzer.normalize(&body.text);
    let (score, tokens_count) = cleaned
        .as_deref()
        .map(|c| state.analyzer.sentiment().score_text(c))
        .unwrap_or((0.0, 0));
    Json(ScoreResp {
        cleaned,
        score,
        tokens_count,
    })
}

async fn analyze(State(state): State<AppState>, Json(rows): Json<Vec<RawRow>>) -> Json<SurveyReport> {
    Json(state.analyzer.analyze(rows))
}
