//! Small utility helpers used across modules.

/// Log-safe truncation for learner input.
/// Cuts on a char boundary so multi-byte text never panics.
pub fn trunc_for_log(s: &str, max_chars: usize) -> String {
  match s.char_indices().nth(max_chars) {
    None => s.to_string(),
    Some((cut, _)) => format!("{}… ({} bytes total)", &s[..cut], s.len()),
  }
}
