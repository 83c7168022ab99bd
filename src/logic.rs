//! Core behaviors behind the HTTP and WebSocket handlers.
//!
//! A `LearnerSession` is owned by exactly one WebSocket connection: it holds that
//! learner's quiz controller, flash-card deck and RNG. Nothing in it is shared.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, instrument};

use crate::grader::grade;
use crate::protocol::{CardOut, QuestionOut, ServerWsMessage, SetupOut, SummaryOut};
use crate::session::{Phase, QuizConfig, QuizController};
use crate::state::{AppState, VocabStatus};
use crate::study::StudyDeck;
use crate::util::trunc_for_log;

pub struct LearnerSession {
  quiz: QuizController,
  deck: Option<StudyDeck>,
  rng: StdRng,
}

impl LearnerSession {
  pub fn new(distractor_count: usize) -> Self {
    Self::with_rng(distractor_count, StdRng::from_entropy())
  }

  pub fn with_rng(distractor_count: usize, rng: StdRng) -> Self {
    Self { quiz: QuizController::new(distractor_count), deck: None, rng }
  }

  /// Validate the settings against the current deck and start a new quiz.
  /// Replies with the first question.
  #[instrument(level = "info", skip(self, state))]
  pub async fn start_quiz(&mut self, state: &AppState, config: QuizConfig) -> ServerWsMessage {
    let store = match state.snapshot().await {
      Ok(store) => store,
      Err(e) => return ServerWsMessage::error(e),
    };
    match self.quiz.start_quiz(&store, &config, &mut self.rng) {
      Ok(_) => self.current_question(),
      Err(e) => ServerWsMessage::error(e),
    }
  }

  /// Grade the learner's answer to the current question.
  #[instrument(level = "info", skip(self, value), fields(answer_len = value.len()))]
  pub fn submit_answer(&mut self, value: &str) -> ServerWsMessage {
    debug!(target: "quiz", answer = %trunc_for_log(value, 64), "Submission received");
    match self.quiz.submit_answer(value) {
      Ok(feedback) => feedback.into(),
      Err(e) => ServerWsMessage::error(e),
    }
  }

  /// Move on; replies with the next question, or the summary after the last one.
  pub fn advance_question(&mut self) -> ServerWsMessage {
    if let Err(e) = self.quiz.advance() {
      return ServerWsMessage::error(e);
    }
    match self.quiz.phase() {
      Phase::Finished(_) => self.session_summary(),
      _ => self.current_question(),
    }
  }

  /// The question the learner is on, without its answer.
  pub fn current_question(&self) -> ServerWsMessage {
    match self.quiz.current_question() {
      Some(q) => ServerWsMessage::Question { question: QuestionOut::from(q) },
      None => ServerWsMessage::error(format!("no current question (quiz is {})", self.quiz.phase().name())),
    }
  }

  /// Score, percentage and tier of a finished quiz.
  pub fn session_summary(&self) -> ServerWsMessage {
    match self.quiz.summary() {
      Some(s) => ServerWsMessage::Summary { summary: SummaryOut::from(s) },
      None => ServerWsMessage::error(format!("no summary yet (quiz is {})", self.quiz.phase().name())),
    }
  }

  pub fn restart_quiz(&mut self) -> ServerWsMessage {
    self.quiz.restart();
    ServerWsMessage::Reset
  }

  /// Flash-card actions against the current snapshot. A failed load clears the
  /// deck; a reloaded snapshot replaces it.
  pub async fn study(&mut self, state: &AppState, action: StudyAction) -> ServerWsMessage {
    let store = match state.snapshot().await {
      Ok(store) => store,
      Err(e) => {
        self.deck = None;
        return ServerWsMessage::error(e);
      }
    };
    let stale = !self.deck.as_ref().is_some_and(|deck| deck.is_built_from(&store));
    if stale {
      debug!(target: "study", cards = store.len(), "Study deck built from current snapshot");
      self.deck = Some(StudyDeck::new(store));
    }
    let Some(deck) = self.deck.as_mut() else {
      return ServerWsMessage::error("study deck unavailable");
    };
    match action {
      StudyAction::Current => {}
      StudyAction::Next => {
        deck.next();
      }
      StudyAction::Prev => {
        deck.prev();
      }
      StudyAction::Shuffle => deck.shuffle(&mut self.rng),
    }
    match CardOut::from_deck(deck) {
      Some(card) => ServerWsMessage::Card { card },
      None => ServerWsMessage::error("the deck is empty"),
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudyAction {
  Current,
  Next,
  Prev,
  Shuffle,
}

/// Setup-screen bounds derived from the current deck.
pub async fn setup_info(state: &AppState) -> SetupOut {
  match state.status().await {
    VocabStatus::Loaded(store) => SetupOut {
      loaded: true,
      deck_size: store.len(),
      max_questions: store.len(),
      default_count: state.default_count(store.len()),
      error: None,
    },
    VocabStatus::Failed(e) => SetupOut {
      loaded: false,
      deck_size: 0,
      max_questions: 0,
      default_count: 0,
      error: Some(e.to_string()),
    },
  }
}

#[instrument(level = "debug", skip(answer, expected), fields(answer_len = answer.len()))]
pub fn do_grade(answer: &str, expected: &str) -> bool {
  grade(answer, expected)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::AppConfig;
  use crate::domain::{QuestionType, VocabItem};
  use crate::error::LoadError;
  use crate::store::{VocabSource, VocabStore};
  use std::io::Write;

  fn state(items: usize) -> AppState {
    let store = VocabStore::from_items(
      (0..items).map(|i| VocabItem::new(format!("t{i}"), format!("d{i}"))).collect(),
    );
    AppState::with_load_result(AppConfig::default(), VocabSource::parse("words.json"), Ok(store))
  }

  fn learner() -> LearnerSession {
    LearnerSession::with_rng(3, StdRng::seed_from_u64(17))
  }

  fn writing_config(count: usize) -> QuizConfig {
    serde_json::from_value(serde_json::json!({
      "count": count, "answerWith": "term", "types": ["writing"]
    }))
    .unwrap()
  }

  #[tokio::test]
  async fn quiz_flow_over_messages() {
    let state = state(3);
    let mut l = learner();

    let first = match l.start_quiz(&state, writing_config(2)).await {
      ServerWsMessage::Question { question } => question,
      other => panic!("unexpected {other:?}"),
    };
    assert_eq!(first.progress, "Question 1/2");
    assert_eq!(first.kind, QuestionType::Writing);
    let answer = first.prompt.replacen('d', "t", 1);

    assert!(matches!(l.advance_question(), ServerWsMessage::Error { .. }));
    assert!(matches!(l.submit_answer(&answer), ServerWsMessage::AnswerResult { correct: true, score: 1, .. }));
    assert!(matches!(l.submit_answer(&answer), ServerWsMessage::Error { .. }));
    assert!(matches!(l.advance_question(), ServerWsMessage::Question { .. }));
    assert!(matches!(l.session_summary(), ServerWsMessage::Error { .. }));

    assert!(matches!(l.submit_answer("wrong"), ServerWsMessage::AnswerResult { correct: false, score: 1, .. }));
    match l.advance_question() {
      ServerWsMessage::Summary { summary } => {
        assert_eq!(summary.percentage, 50);
        assert_eq!(summary.tier, "needs practice");
      }
      other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(l.restart_quiz(), ServerWsMessage::Reset));
    assert!(matches!(l.current_question(), ServerWsMessage::Error { .. }));
  }

  #[tokio::test]
  async fn empty_types_are_rejected() {
    let state = state(3);
    let mut l = learner();
    let cfg: QuizConfig = serde_json::from_value(serde_json::json!({"count": 2, "types": []})).unwrap();
    match l.start_quiz(&state, cfg).await {
      ServerWsMessage::Error { message } => assert!(message.contains("question type")),
      other => panic!("unexpected {other:?}"),
    }
  }

  #[tokio::test]
  async fn bad_form_values_get_validation_messages() {
    let state = state(3);
    let mut l = learner();
    let cfg: QuizConfig = serde_json::from_value(serde_json::json!({"count": 2})).unwrap();
    match l.start_quiz(&state, cfg).await {
      ServerWsMessage::Error { message } => assert!(message.contains("question type")),
      other => panic!("unexpected {other:?}"),
    }
    let cfg: QuizConfig =
      serde_json::from_value(serde_json::json!({"count": -1, "types": ["writing"]})).unwrap();
    match l.start_quiz(&state, cfg).await {
      ServerWsMessage::Error { message } => assert_eq!(message, "question count must be between 1 and 3, got -1"),
      other => panic!("unexpected {other:?}"),
    }
  }

  #[tokio::test]
  async fn failed_load_disables_quiz_and_study() {
    let state = AppState::with_load_result(
      AppConfig::default(),
      VocabSource::parse("words.json"),
      Err(LoadError::Malformed("expected value".into())),
    );
    let mut l = learner();
    assert!(matches!(l.start_quiz(&state, writing_config(1)).await, ServerWsMessage::Error { .. }));
    assert!(matches!(l.study(&state, StudyAction::Current).await, ServerWsMessage::Error { .. }));

    let setup = setup_info(&state).await;
    assert!(!setup.loaded);
    assert!(setup.error.unwrap().contains("malformed"));
  }

  #[tokio::test]
  async fn failed_reload_disables_open_study_deck() {
    let state = state(2);
    let mut l = learner();
    assert!(matches!(l.study(&state, StudyAction::Current).await, ServerWsMessage::Card { .. }));

    assert!(state.reload().await.is_err());
    assert!(matches!(l.start_quiz(&state, writing_config(1)).await, ServerWsMessage::Error { .. }));
    match l.study(&state, StudyAction::Next).await {
      ServerWsMessage::Error { message } => assert!(message.contains("unreachable")),
      other => panic!("study still served after failed reload: {other:?}"),
    }
  }

  #[tokio::test]
  async fn successful_reload_replaces_open_study_deck() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"[{"term": "uno", "definition": "one"}]"#).unwrap();
    let initial = VocabStore::from_items(vec![VocabItem::new("a", "b"), VocabItem::new("c", "d")]);
    let state = AppState::with_load_result(
      AppConfig::default(),
      VocabSource::Path(file.path().to_path_buf()),
      Ok(initial),
    );
    let mut l = learner();
    match l.study(&state, StudyAction::Next).await {
      ServerWsMessage::Card { card } => assert_eq!(card.counter, "2 / 2"),
      other => panic!("unexpected {other:?}"),
    }

    assert_eq!(state.reload().await.unwrap(), 1);
    match l.study(&state, StudyAction::Current).await {
      ServerWsMessage::Card { card } => {
        assert_eq!(card.term, "uno");
        assert_eq!(card.counter, "1 / 1");
      }
      other => panic!("unexpected {other:?}"),
    }
  }

  #[tokio::test]
  async fn study_moves_through_cards() {
    let state = state(2);
    let mut l = learner();
    match l.study(&state, StudyAction::Current).await {
      ServerWsMessage::Card { card } => assert_eq!(card.counter, "1 / 2"),
      other => panic!("unexpected {other:?}"),
    }
    match l.study(&state, StudyAction::Next).await {
      ServerWsMessage::Card { card } => assert_eq!((card.term.as_str(), card.index), ("t1", 1)),
      other => panic!("unexpected {other:?}"),
    }
    match l.study(&state, StudyAction::Next).await {
      ServerWsMessage::Card { card } => assert_eq!(card.counter, "2 / 2"),
      other => panic!("unexpected {other:?}"),
    }
    match l.study(&state, StudyAction::Shuffle).await {
      ServerWsMessage::Card { card } => assert_eq!(card.index, 0),
      other => panic!("unexpected {other:?}"),
    }
  }

  #[tokio::test]
  async fn setup_defaults_follow_deck_size() {
    let setup = setup_info(&state(3)).await;
    assert!(setup.loaded);
    assert_eq!((setup.max_questions, setup.default_count), (3, 3));
    let setup = setup_info(&state(12)).await;
    assert_eq!((setup.max_questions, setup.default_count), (12, 5));
  }
}
