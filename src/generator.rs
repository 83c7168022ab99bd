//! Quiz question generation.
//!
//! Draws a uniform permutation of the pool (Fisher-Yates via `SliceRandom::shuffle`),
//! keeps the first `count` items and turns each into a `QuestionSpec` with a random
//! enabled type and a resolved answer direction.

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument};

use crate::domain::{AnswerDirection, Choices, DirectionPolicy, QuestionSpec, QuestionType, VocabItem};
use crate::error::ConfigValidationError;
use crate::sampler::{multiple_choice_options, true_false_statement};

/// Build `count` questions from `pool`. `count` is clamped to `[1, pool.len()]`.
///
/// Fails when no question type is enabled or the pool is empty. The pool itself
/// is never reordered.
#[instrument(level = "debug", skip(pool, rng), fields(pool_len = pool.len()))]
pub fn generate<R: Rng + ?Sized>(
  pool: &[Arc<VocabItem>],
  count: usize,
  enabled_types: &BTreeSet<QuestionType>,
  direction_policy: DirectionPolicy,
  distractor_count: usize,
  rng: &mut R,
) -> Result<Vec<QuestionSpec>, ConfigValidationError> {
  if enabled_types.is_empty() {
    return Err(ConfigValidationError::NoQuestionTypes);
  }
  if pool.is_empty() {
    return Err(ConfigValidationError::NoVocabulary);
  }
  let count = count.clamp(1, pool.len());
  let types: Vec<QuestionType> = enabled_types.iter().copied().collect();

  let mut order: Vec<&Arc<VocabItem>> = pool.iter().collect();
  order.shuffle(rng);

  let mut questions = Vec::with_capacity(count);
  for item in order.into_iter().take(count) {
    // `types` is non-empty, checked above.
    let kind = types.choose(&mut *rng).copied().unwrap_or(QuestionType::Writing);
    let direction = resolve_direction(direction_policy, &mut *rng);
    questions.push(build_question(pool, item, kind, direction, distractor_count, &mut *rng));
  }

  debug!(target: "quiz", count = questions.len(), ?direction_policy, "Generated questions");
  Ok(questions)
}

fn resolve_direction<R: Rng + ?Sized>(policy: DirectionPolicy, rng: &mut R) -> AnswerDirection {
  match policy {
    DirectionPolicy::Term => AnswerDirection::AskTerm,
    DirectionPolicy::Definition => AnswerDirection::AskDefinition,
    DirectionPolicy::Mixed => {
      if rng.gen_bool(0.5) { AnswerDirection::AskTerm } else { AnswerDirection::AskDefinition }
    }
  }
}

fn build_question<R: Rng + ?Sized>(
  pool: &[Arc<VocabItem>],
  item: &Arc<VocabItem>,
  kind: QuestionType,
  direction: AnswerDirection,
  distractor_count: usize,
  rng: &mut R,
) -> QuestionSpec {
  let field = direction.expected_field();
  let choices = match kind {
    QuestionType::MultipleChoice => Choices::Options {
      options: multiple_choice_options(pool, item, distractor_count, field, rng),
    },
    QuestionType::TrueFalse => {
      let (statement, is_true) = true_false_statement(pool, item, field, rng);
      Choices::Statement { statement, is_true }
    }
    QuestionType::Writing => Choices::FreeText,
  };

  QuestionSpec {
    kind,
    prompt_text: item.field(direction.prompt_field()).to_string(),
    expected_answer: item.field(field).to_string(),
    direction,
    source_item: Arc::clone(item),
    choices,
  }
}
