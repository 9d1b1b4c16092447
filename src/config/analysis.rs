// src/config/analysis.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::corpus::StopWords;
use crate::normalize::DictionaryLemmatizer;
use crate::sentiment::Lexicon;

pub const ENV_CONFIG_PATH: &str = "SURVEY_CONFIG_PATH";
pub const DEFAULT_TOML_PATH: &str = "config/analysis.toml";
pub const DEFAULT_JSON_PATH: &str = "config/analysis.json";

fn default_side_count() -> usize {
    15
}
fn default_top_k() -> usize {
    5
}
fn default_max_words() -> usize {
    100
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub differential: DifferentialCfg,
    #[serde(default)]
    pub ranking: RankingCfg,
    #[serde(default)]
    pub word_cloud: WordCloudCfg,
    #[serde(default)]
    pub resources: ResourcesCfg,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferentialCfg {
    /// Most oppose-leaning words to keep.
    #[serde(default = "default_side_count")]
    pub neg_count: usize,
    /// Most support-leaning words to keep.
    #[serde(default = "default_side_count")]
    pub pos_count: usize,
}

impl Default for DifferentialCfg {
    fn default() -> Self {
        Self {
            neg_count: default_side_count(),
            pos_count: default_side_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingCfg {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RankingCfg {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloudCfg {
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

impl Default for WordCloudCfg {
    fn default() -> Self {
        Self {
            max_words: default_max_words(),
        }
    }
}

/// Optional file overrides for the embedded vocabularies (JSON files).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcesCfg {
    pub stopwords: Option<PathBuf>,
    pub lexicon: Option<PathBuf>,
    pub lemmas: Option<PathBuf>,
}

impl ResourcesCfg {
    pub fn stopwords(&self) -> Result<StopWords> {
        match &self.stopwords {
            Some(p) => StopWords::load_from_file(p),
            None => Ok(StopWords::english()),
        }
    }

    pub fn lexicon(&self) -> Result<Option<Lexicon>> {
        self.lexicon
            .as_deref()
            .map(Lexicon::load_from_file)
            .transpose()
    }

    pub fn lemmatizer(&self) -> Result<DictionaryLemmatizer> {
        match &self.lemmas {
            Some(p) => DictionaryLemmatizer::load_from_file(p),
            None => Ok(DictionaryLemmatizer::english()),
        }
    }
}

impl AnalysisConfig {
    /// Load from an explicit path. Supports TOML or JSON formats.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading analysis config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let mut cfg = parse_config(&content, ext.as_str())
            .with_context(|| format!("parsing analysis config {}", path.display()))?;
        cfg.resources.resolve_relative_to(path.parent());
        Ok(cfg)
    }

    /// Load using env var + fallbacks:
    /// 1) $SURVEY_CONFIG_PATH
    /// 2) config/analysis.toml
    /// 3) config/analysis.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            } else {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
        }
        let toml_p = PathBuf::from(DEFAULT_TOML_PATH);
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        let json_p = PathBuf::from(DEFAULT_JSON_PATH);
        if json_p.exists() {
            return Self::load_from(&json_p);
        }
        Ok(Self::default())
    }
}

impl ResourcesCfg {
    // Relative resource paths are taken relative to the config file.
    fn resolve_relative_to(&mut self, base: Option<&Path>) {
        let Some(base) = base else { return };
        for p in [&mut self.stopwords, &mut self.lexicon, &mut self.lemmas]
            .into_iter()
            .flatten()
        {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        }
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<AnalysisConfig> {
    if hint_ext == "json" {
        return serde_json::from_str(s).context("invalid JSON analysis config");
    }
    if hint_ext == "toml" {
        return toml::from_str(s).context("invalid TOML analysis config");
    }
    // Unknown extension: try TOML, then JSON.
    if let Ok(v) = toml::from_str(s) {
        return Ok(v);
    }
    serde_json::from_str(s).map_err(|_| anyhow!("unsupported analysis config format"))
}
