//! Answer grading: trim, lowercase, exact match. No partial credit, no fuzzy matching.

/// Canonical form used for comparisons.
pub fn normalize_answer(s: &str) -> String {
  s.trim().to_lowercase()
}

/// True when `user_answer` matches `expected_answer` after normalization.
pub fn grade(user_answer: &str, expected_answer: &str) -> bool {
  normalize_answer(user_answer) == normalize_answer(expected_answer)
}
