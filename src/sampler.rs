//! Distractor sampling for multiple-choice and true/false questions.
//!
//! Items are excluded by identity (`Arc::ptr_eq`), not by value. Candidates whose
//! text normalizes to the correct answer are skipped as well, so a duplicated
//! entry in the data never shows up as a second "correct" option.

use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::domain::{Field, VocabItem};
use crate::grader::normalize_answer;

/// Up to `n` wrong answers for `excluding`, taken from `field` of other pool items.
/// Returns fewer than `n` when the pool is too small.
pub fn sample_distractors<R: Rng + ?Sized>(
  pool: &[Arc<VocabItem>],
  excluding: &Arc<VocabItem>,
  n: usize,
  field: Field,
  rng: &mut R,
) -> Vec<String> {
  let correct = normalize_answer(excluding.field(field));
  let mut candidates: Vec<&Arc<VocabItem>> =
    pool.iter().filter(|item| !Arc::ptr_eq(item, excluding)).collect();
  candidates.shuffle(rng);

  let mut seen = HashSet::new();
  seen.insert(correct);
  candidates
    .into_iter()
    .map(|item| item.field(field))
    .filter(|text| seen.insert(normalize_answer(text)))
    .take(n)
    .map(str::to_string)
    .collect()
}

/// Correct answer shuffled among up to `n` distractors.
pub fn multiple_choice_options<R: Rng + ?Sized>(
  pool: &[Arc<VocabItem>],
  item: &Arc<VocabItem>,
  n: usize,
  field: Field,
  rng: &mut R,
) -> Vec<String> {
  let mut options = sample_distractors(pool, item, n, field, rng);
  options.push(item.field(field).to_string());
  options.shuffle(rng);
  options
}

/// Statement for a true/false question and whether it is true.
///
/// A fair coin decides; a false statement needs one distractor, and when none
/// exists (single-item pool) the correct answer is shown as a true statement.
pub fn true_false_statement<R: Rng + ?Sized>(
  pool: &[Arc<VocabItem>],
  item: &Arc<VocabItem>,
  field: Field,
  rng: &mut R,
) -> (String, bool) {
  let correct = item.field(field).to_string();
  if rng.gen_bool(0.5) {
    return (correct, true);
  }
  match sample_distractors(pool, item, 1, field, rng).pop() {
    Some(wrong) => (wrong, false),
    None => {
      debug!(target: "quiz", term = %item.term, "No distractor available; true/false falls back to a true statement");
      (correct, true)
    }
  }
}
