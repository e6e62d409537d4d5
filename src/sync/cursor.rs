//! Pagination progress for one browsing session.

/// Tracks where a browsing session is in the remote page sequence.
///
/// Lives only in memory; a new session starts from scratch and `reset`
/// restores the initial values on refresh. `is_loading_page` is the
/// single-flight guard and is only ever set and cleared by a fetch cycle,
/// so `reset` deliberately leaves it alone.
#[derive(Debug, Clone)]
pub struct PageCursor {
  /// Records per page, fixed for the session.
  pub page_size: usize,
  /// Next remote page index to request, zero-based.
  pub current_page: usize,
  /// Set once a remote fetch returns fewer than `page_size` records.
  pub is_last_page: bool,
  /// True while a fetch cycle is in flight.
  pub is_loading_page: bool,
  pub has_loaded_initial_data: bool,
}

impl PageCursor {
  pub fn new(page_size: usize) -> Self {
    Self {
      page_size,
      current_page: 0,
      is_last_page: false,
      is_loading_page: false,
      has_loaded_initial_data: false,
    }
  }

  /// Return to the initial state, keeping the page size and any in-flight
  /// guard.
  pub fn reset(&mut self) {
    self.current_page = 0;
    self.is_last_page = false;
    self.has_loaded_initial_data = false;
  }

  /// Number of records the local cache must hold for the next page to be
  /// served without a remote call.
  pub fn expected_local_count(&self) -> usize {
    (self.current_page + 1) * self.page_size
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_cursor_is_idle() {
    let cursor = PageCursor::new(20);
    assert_eq!(cursor.current_page, 0);
    assert!(!cursor.is_last_page);
    assert!(!cursor.is_loading_page);
    assert!(!cursor.has_loaded_initial_data);
  }

  #[test]
  fn test_expected_local_count_grows_with_page() {
    let mut cursor = PageCursor::new(20);
    assert_eq!(cursor.expected_local_count(), 20);

    cursor.current_page = 2;
    assert_eq!(cursor.expected_local_count(), 60);
  }

  #[test]
  fn test_reset_keeps_guard() {
    let mut cursor = PageCursor::new(20);
    cursor.current_page = 3;
    cursor.is_last_page = true;
    cursor.has_loaded_initial_data = true;
    cursor.is_loading_page = true;

    cursor.reset();

    assert_eq!(cursor.current_page, 0);
    assert!(!cursor.is_last_page);
    assert!(!cursor.has_loaded_initial_data);
    assert!(cursor.is_loading_page);
  }
}
