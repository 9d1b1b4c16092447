//! Survey Sentiment Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the analyzer, metrics and CORS.

use anyhow::Context;
use tracing::info;

use survey_sentiment_analyzer::api::{self, AppState};
use survey_sentiment_analyzer::config::AnalysisConfig;
use survey_sentiment_analyzer::debug::LogMode;
use survey_sentiment_analyzer::metrics::Metrics;
use survey_sentiment_analyzer::report::SurveyAnalyzer;

const ENV_BIND_ADDR: &str = "SURVEY_BIND_ADDR";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    LogMode::from_env().init_tracing();

    let cfg = AnalysisConfig::load_default().context("loading analysis config")?;
    let analyzer = SurveyAnalyzer::from_config(&cfg).context("loading vocabularies")?;
    let metrics = Metrics::init(analyzer.settings())?;

    let router = api::router(AppState::new(analyzer)).merge(metrics.router());

    let addr = std::env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(target: "survey", %addr, "listening");

    axum::serve(listener, router).await.context("serving http")?;
    Ok(())
}
