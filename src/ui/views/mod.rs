pub mod breed_detail;
pub mod breed_list;
pub mod favorites;

/// Trim a string for a fixed-width column.
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", cut)
  }
}
