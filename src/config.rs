//! Loading application configuration (vocabulary source, static dir, quiz defaults) from TOML.
//!
//! Example `APP_CONFIG_PATH` file:
//!
//! ```toml
//! vocab_source = "https://example.com/words.json"
//! static_dir = "./static"
//!
//! [quiz]
//! default_count = 5
//! distractor_count = 3
//! ```

use serde::Deserialize;
use tracing::{error, info};

use crate::store::VocabSource;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
  /// File path or http(s) URL of the `words.json` deck.
  pub vocab_source: String,
  pub static_dir: String,
  pub quiz: QuizDefaults,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      vocab_source: "./static/words.json".into(),
      static_dir: "./static".into(),
      quiz: QuizDefaults::default(),
    }
  }
}

impl AppConfig {
  pub fn vocab_source(&self) -> VocabSource {
    VocabSource::parse(&self.vocab_source)
  }
}

/// Setup-screen defaults.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QuizDefaults {
  /// Pre-filled question count, capped at the deck size.
  pub default_count: usize,
  /// Wrong options shown next to the right one in multiple choice.
  pub distractor_count: usize,
}

impl Default for QuizDefaults {
  fn default() -> Self {
    Self { default_count: 5, distractor_count: 3 }
  }
}

pub fn parse_app_config(raw: &str) -> Result<AppConfig, toml::de::Error> {
  toml::from_str::<AppConfig>(raw)
}

/// Attempt to load `AppConfig` from APP_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("APP_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_app_config(&s) {
      Ok(cfg) => {
        info!(target: "vocab_trainer", %path, "Loaded app config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "vocab_trainer", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "vocab_trainer", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

/// File config (or defaults) with the VOCAB_SOURCE override applied.
pub fn resolve_app_config() -> AppConfig {
  let mut cfg = load_app_config_from_env().unwrap_or_default();
  if let Ok(source) = std::env::var("VOCAB_SOURCE") {
    if !source.trim().is_empty() {
      cfg.vocab_source = source;
    }
  }
  cfg
}
