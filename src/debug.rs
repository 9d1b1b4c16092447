// src/debug.rs
//! Log mode for the survey service. Answers are never logged verbatim: rows are
//! identified by index, and in dev mode also by a fingerprint of their text so
//! repeated answers can be spotted across runs.
//!
//! `SURVEY_LOG` takes comma-separated flags:
//! - `dev`  debug-level `survey` events plus per-row fingerprints. Honoured only in
//!   debug builds or when `SURVEY_ENV` is `local`, `development` or `dev`.
//! - `json` JSON formatter instead of the compact one.

use sha2::{Digest, Sha256};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG: &str = "SURVEY_LOG";
pub const ENV_DEPLOYMENT: &str = "SURVEY_ENV";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogMode {
    pub dev: bool,
    pub json: bool,
}

impl LogMode {
    /// Reads `SURVEY_LOG` and `SURVEY_ENV` once.
    pub fn from_env() -> Self {
        let flags = std::env::var(ENV_LOG).unwrap_or_default();
        let deployment = std::env::var(ENV_DEPLOYMENT).unwrap_or_default();
        let dev_allowed = cfg!(debug_assertions)
            || matches!(
                deployment.trim().to_ascii_lowercase().as_str(),
                "local" | "development" | "dev"
            );
        Self::parse(&flags, dev_allowed)
    }

    pub fn parse(flags: &str, dev_allowed: bool) -> Self {
        let mut mode = Self::default();
        for flag in flags.split(',').map(str::trim) {
            match flag.to_ascii_lowercase().as_str() {
                "dev" => mode.dev = dev_allowed,
                "json" => mode.json = true,
                _ => {}
            }
        }
        mode
    }

    /// Filter used when `RUST_LOG` is unset.
    pub fn default_filter(&self) -> &'static str {
        if self.dev {
            "survey=debug,info"
        } else {
            "survey=info,warn"
        }
    }

    /// Installs the global subscriber. `RUST_LOG` wins over [`Self::default_filter`].
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_filter()));
        let registry = tracing_subscriber::registry().with(filter);
        let res = if self.json {
            registry.with(fmt::layer().json()).try_init()
        } else {
            registry.with(fmt::layer().compact()).try_init()
        };
        if let Err(e) = res {
            eprintln!("tracing already initialised: {e}");
        }
    }
}

/// 12 hex chars of SHA-256 over the answer with whitespace collapsed and case
/// folded, so the same answer typed twice shares a fingerprint.
pub fn answer_fingerprint(text: &str) -> String {
    let folded = text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    Sha256::digest(folded.as_bytes())
        .iter()
        .take(6)
        .map(|b| format!("{b:02x}"))
        .collect()
}
