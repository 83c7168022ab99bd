//! Application state: configuration and the current vocabulary snapshot.
//!
//! The snapshot is replaced wholesale on reload. Quizzes and study decks that
//! already started keep the `Arc` they were built from, so their questions
//! always point into the snapshot they came from.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use crate::config::AppConfig;
use crate::error::LoadError;
use crate::store::{VocabSource, VocabStore};

/// Either a loaded deck or the reason there is none.
#[derive(Clone, Debug)]
pub enum VocabStatus {
    Loaded(Arc<VocabStore>),
    Failed(LoadError),
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub source: VocabSource,
    vocab: Arc<RwLock<VocabStatus>>,
}

impl AppState {
    /// Build state from config and run the initial load. A failed load leaves the
    /// store empty; quiz and study requests are refused until a reload succeeds.
    #[instrument(level = "info", skip_all)]
    pub async fn new(config: AppConfig) -> Self {
        let source = config.vocab_source();
        let loaded = VocabStore::load(&source).await;
        Self::with_load_result(config, source, loaded)
    }

    pub fn with_load_result(
        config: AppConfig,
        source: VocabSource,
        loaded: Result<VocabStore, LoadError>,
    ) -> Self {
        let status = match loaded {
            Ok(store) => VocabStatus::Loaded(Arc::new(store)),
            Err(e) => {
                warn!(target: "vocab_trainer", %source, error = %e, "Starting without vocabulary; quiz and study are disabled");
                VocabStatus::Failed(e)
            }
        };
        Self { config, source, vocab: Arc::new(RwLock::new(status)) }
    }

    pub async fn status(&self) -> VocabStatus {
        self.vocab.read().await.clone()
    }

    /// The current deck, or the load error that explains why there is none.
    pub async fn snapshot(&self) -> Result<Arc<VocabStore>, LoadError> {
        match &*self.vocab.read().await {
            VocabStatus::Loaded(store) => Ok(Arc::clone(store)),
            VocabStatus::Failed(e) => Err(e.clone()),
        }
    }

    /// Re-read the configured source. On failure the previous deck is dropped.
    #[instrument(level = "info", skip(self), fields(source = %self.source))]
    pub async fn reload(&self) -> Result<usize, LoadError> {
        let loaded = VocabStore::load(&self.source).await;
        let mut guard = self.vocab.write().await;
        match loaded {
            Ok(store) => {
                let len = store.len();
                *guard = VocabStatus::Loaded(Arc::new(store));
                info!(target: "vocab_trainer", items = len, "Vocabulary reloaded");
                Ok(len)
            }
            Err(e) => {
                *guard = VocabStatus::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// Pre-filled question count for the setup screen.
    pub fn default_count(&self, deck_size: usize) -> usize {
        self.config.quiz.default_count.min(deck_size)
    }
}
