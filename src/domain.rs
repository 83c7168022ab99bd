//! Domain models: vocabulary items, question types, answer direction and the
//! per-question specification produced by the generator.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Label used as the answer key of a true statement.
pub const TRUE_LABEL: &str = "True";
/// Label used as the answer key of a false statement.
pub const FALSE_LABEL: &str = "False";

/// One term/definition pair as stored in `words.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabItem {
  pub term: String,
  pub definition: String,
}

impl VocabItem {
  pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
    Self { term: term.into(), definition: definition.into() }
  }

  pub fn field(&self, field: Field) -> &str {
    match field {
      Field::Term => &self.term,
      Field::Definition => &self.definition,
    }
  }
}

/// Which side of a vocabulary item a piece of text comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
  Term,
  Definition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
  #[serde(alias = "multiple")]
  MultipleChoice,
  #[serde(alias = "tf")]
  TrueFalse,
  Writing,
}

/// What the learner has to produce.
///
/// `AskTerm` shows the definition and expects the term,
/// `AskDefinition` shows the term and expects the definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerDirection {
  AskTerm,
  AskDefinition,
}

impl AnswerDirection {
  /// Field the learner must answer with.
  pub fn expected_field(self) -> Field {
    match self {
      AnswerDirection::AskTerm => Field::Term,
      AnswerDirection::AskDefinition => Field::Definition,
    }
  }

  /// Field shown as the prompt.
  pub fn prompt_field(self) -> Field {
    match self {
      AnswerDirection::AskTerm => Field::Definition,
      AnswerDirection::AskDefinition => Field::Term,
    }
  }
}

/// Quiz-level direction setting; `Mixed` flips a fair coin per question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionPolicy {
  #[default]
  Term,
  #[serde(alias = "def")]
  Definition,
  Mixed,
}

/// How a question is answered, fixed when the question is generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Choices {
  /// Multiple choice: the correct answer shuffled among distractors.
  Options { options: Vec<String> },
  /// True/false: `statement` is either the correct answer or a distractor.
  Statement { statement: String, is_true: bool },
  /// Free-text entry.
  FreeText,
}

/// A single generated question. Immutable for the lifetime of a quiz.
#[derive(Clone, Debug)]
pub struct QuestionSpec {
  pub kind: QuestionType,
  pub prompt_text: String,
  pub expected_answer: String,
  pub direction: AnswerDirection,
  /// Shared with the store snapshot the quiz was built from; compared by pointer.
  pub source_item: Arc<VocabItem>,
  pub choices: Choices,
}

impl QuestionSpec {
  /// The text a submission is graded against.
  pub fn answer_key(&self) -> &str {
    match &self.choices {
      Choices::Statement { is_true: true, .. } => TRUE_LABEL,
      Choices::Statement { is_true: false, .. } => FALSE_LABEL,
      Choices::Options { .. } | Choices::FreeText => &self.expected_answer,
    }
  }
}
