//! Error types surfaced to callers of the store, the generator and the session controller.

use thiserror::Error;

/// The vocabulary source could not be turned into a usable deck.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
  /// File missing, connection refused, non-2xx response, ...
  #[error("vocabulary source unreachable: {0}")]
  Unreachable(String),

  /// Not a JSON array of `{ term, definition }` objects.
  #[error("vocabulary source is malformed: {0}")]
  Malformed(String),

  #[error("vocabulary source contains no items")]
  Empty,
}

/// A quiz could not be started with the requested settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
  #[error("select at least one question type")]
  NoQuestionTypes,

  #[error("question count must be between 1 and {max}, got {requested}")]
  CountOutOfRange { requested: i64, max: usize },

  #[error("no vocabulary is loaded")]
  NoVocabulary,
}

/// A session action that is not allowed in the current state. Never mutates the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
  #[error("no quiz is in progress")]
  NotActive,

  #[error("question {} has already been answered", .0 + 1)]
  AlreadyAnswered(usize),

  #[error("question {} has not been answered yet", .0 + 1)]
  NotAnswered(usize),
}
