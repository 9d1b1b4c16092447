//! Prometheus exposition for the survey service.
//!
//! Counters and gauges are emitted where the work happens (`ingest`); this module
//! only owns the recorder handle and the `/metrics` route.

use anyhow::Context;
use axum::{extract::State, http::header, response::IntoResponse, routing::get, Router};
use metrics::gauge;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::report::AnalysisSettings;

const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

#[derive(Clone)]
pub struct Metrics {
    handle: PrometheusHandle,
}

impl Metrics {
    /// Installs the global recorder and publishes the analysis settings the
    /// service was started with.
    pub fn init(settings: AnalysisSettings) -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;
        let metrics = Self::from_handle(handle);
        metrics.publish_settings(settings);
        Ok(metrics)
    }

    /// Wraps an existing handle without touching the global recorder.
    pub fn from_handle(handle: PrometheusHandle) -> Self {
        Self { handle }
    }

    fn publish_settings(&self, settings: AnalysisSettings) {
        gauge!("survey_config_neg_count").set(settings.neg_count as f64);
        gauge!("survey_config_pos_count").set(settings.pos_count as f64);
        gauge!("survey_config_top_k").set(settings.top_k as f64);
        gauge!("survey_config_word_cloud_max_words").set(settings.word_cloud_max_words as f64);
    }

    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// `GET /metrics` in the Prometheus text format.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/metrics", get(exposition))
            .with_state(self.clone())
    }
}

async fn exposition(State(metrics): State<Metrics>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], metrics.render())
}
