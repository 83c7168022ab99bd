//! Vocabulary store: the deck loaded once from `words.json` (a local file or an http(s) URL).
//!
//! Items are handed out as `Arc<VocabItem>` so questions can point back at the exact
//! item they were built from; identity is pointer identity.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::USER_AGENT;
use tracing::{error, info, instrument};

use crate::domain::VocabItem;
use crate::error::LoadError;

/// Where the deck comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VocabSource {
  Url(String),
  Path(PathBuf),
}

impl VocabSource {
  /// `http://` and `https://` are fetched over the network; anything else is a file path.
  pub fn parse(raw: &str) -> Self {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
      VocabSource::Url(raw.to_string())
    } else {
      VocabSource::Path(PathBuf::from(raw))
    }
  }
}

impl std::fmt::Display for VocabSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      VocabSource::Url(u) => write!(f, "{u}"),
      VocabSource::Path(p) => write!(f, "{}", p.display()),
    }
  }
}

#[derive(Clone, Debug, Default)]
pub struct VocabStore {
  items: Vec<Arc<VocabItem>>,
}

impl VocabStore {
  pub fn from_items(items: Vec<VocabItem>) -> Self {
    Self { items: items.into_iter().map(Arc::new).collect() }
  }

  /// Parse a JSON array of `{ "term": ..., "definition": ... }` objects.
  pub fn from_json(raw: &str) -> Result<Self, LoadError> {
    let items: Vec<VocabItem> =
      serde_json::from_str(raw).map_err(|e| LoadError::Malformed(e.to_string()))?;
    if items.is_empty() {
      return Err(LoadError::Empty);
    }
    Ok(Self::from_items(items))
  }

  /// Read and parse the deck. On failure nothing is returned; callers keep no partial data.
  #[instrument(level = "info", fields(%source))]
  pub async fn load(source: &VocabSource) -> Result<Self, LoadError> {
    let raw = match source {
      VocabSource::Url(url) => fetch_text(url).await,
      VocabSource::Path(path) => tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LoadError::Unreachable(format!("{}: {}", path.display(), e))),
    };

    let result = raw.and_then(|text| Self::from_json(&text));
    match &result {
      Ok(store) => info!(target: "vocab_trainer", %source, items = store.len(), "Vocabulary loaded"),
      Err(e) => error!(target: "vocab_trainer", %source, error = %e, "Vocabulary load failed"),
    }
    result
  }

  pub fn items(&self) -> &[Arc<VocabItem>] {
    &self.items
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
  let client = reqwest::Client::builder()
    .timeout(Duration::from_secs(20))
    .build()
    .map_err(|e| LoadError::Unreachable(e.to_string()))?;

  let res = client
    .get(url)
    .header(USER_AGENT, "vocab-trainer/0.1")
    .send()
    .await
    .map_err(|e| LoadError::Unreachable(e.to_string()))?;

  if !res.status().is_success() {
    return Err(LoadError::Unreachable(format!("HTTP {} from {}", res.status(), url)));
  }
  res.text().await.map_err(|e| LoadError::Unreachable(e.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  const WORDS: &str = r#"[
    {"term": "perro", "definition": "dog"},
    {"term": "gato", "definition": "cat", "notes": "ignored"}
  ]"#;

  #[test]
  fn parses_items_in_order() {
    let store = VocabStore::from_json(WORDS).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.items()[0].term, "perro");
    assert_eq!(store.items()[1].definition, "cat");
  }

  #[test]
  fn rejects_malformed_input() {
    assert!(matches!(VocabStore::from_json("not json"), Err(LoadError::Malformed(_))));
    assert!(matches!(VocabStore::from_json(r#"{"term": "x"}"#), Err(LoadError::Malformed(_))));
    assert!(matches!(
      VocabStore::from_json(r#"[{"term": "perro"}]"#),
      Err(LoadError::Malformed(_))
    ));
    assert_eq!(VocabStore::from_json("[]").unwrap_err(), LoadError::Empty);
  }

  #[test]
  fn parses_source_kind() {
    assert_eq!(
      VocabSource::parse("https://example.com/words.json"),
      VocabSource::Url("https://example.com/words.json".into())
    );
    assert_eq!(
      VocabSource::parse("./static/words.json"),
      VocabSource::Path(PathBuf::from("./static/words.json"))
    );
  }

  #[tokio::test]
  async fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(WORDS.as_bytes()).unwrap();
    let source = VocabSource::Path(file.path().to_path_buf());
    let store = VocabStore::load(&source).await.unwrap();
    assert_eq!(store.len(), 2);
  }

  #[tokio::test]
  async fn missing_file_is_unreachable() {
    let dir = tempfile::tempdir().unwrap();
    let source = VocabSource::Path(dir.path().join("nope.json"));
    assert!(matches!(VocabStore::load(&source).await, Err(LoadError::Unreachable(_))));
  }

  #[tokio::test]
  async fn loads_from_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/words.json"))
      .respond_with(ResponseTemplate::new(200).set_body_string(WORDS))
      .mount(&server)
      .await;

    let source = VocabSource::parse(&format!("{}/words.json", server.uri()));
    let store = VocabStore::load(&source).await.unwrap();
    assert_eq!(store.items()[1].term, "gato");
  }

  #[tokio::test]
  async fn http_error_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/words.json"))
      .respond_with(ResponseTemplate::new(404))
      .mount(&server)
      .await;

    let source = VocabSource::parse(&format!("{}/words.json", server.uri()));
    assert!(matches!(VocabStore::load(&source).await, Err(LoadError::Unreachable(_))));
  }

  #[tokio::test]
  async fn bad_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/words.json"))
      .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
      .mount(&server)
      .await;

    let source = VocabSource::parse(&format!("{}/words.json", server.uri()));
    assert!(matches!(VocabStore::load(&source).await, Err(LoadError::Malformed(_))));
  }
}
