//! The pagination/synchronization core.
//!
//! `SyncCoordinator` reconciles the local breed cache with the remote
//! paginated API. Each "load more" trigger either serves the next page from
//! the cache (when a previous session already stored enough records) or
//! fetches it remotely, writes the new records back, and re-reads the sorted
//! view so cached and fresh records interleave consistently. End-of-data is
//! inferred from a short remote page; the protocol carries no total count.
//!
//! All state lives behind one mutex that is never held across an await.
//! The presentation layer reads an atomic `snapshot()` and can register an
//! observer callback to hear about completed cycles.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use color_eyre::Result;
use tracing::warn;

use super::cursor::PageCursor;
use crate::api::RemoteSource;
use crate::breed::Breed;
use crate::store::BreedStore;

/// Fired through the registered observer after every completed cycle and
/// after local mutations (search text, favorite flips).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent {
  Updated,
}

type Observer = Box<dyn Fn(SyncEvent) + Send + Sync>;

/// Point-in-time copy of the published state, taken under the state lock.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
  /// The sorted, deduplicated collection as published so far.
  pub breeds: Vec<Breed>,
  /// Current search text.
  pub search: String,
  /// User-visible loading flag (first page of a fresh collection only).
  pub is_loading: bool,
  pub is_last_page: bool,
  pub error: Option<String>,
}

impl Snapshot {
  /// The collection the user should see: search-filtered when a query is
  /// active, the full collection otherwise.
  pub fn visible(&self) -> Vec<Breed> {
    filter_by_name(&self.breeds, &self.search)
  }
}

/// Case-insensitive substring filter on breed names. An empty query keeps
/// everything. Pure; pagination is frozen separately while a query is active.
pub fn filter_by_name(breeds: &[Breed], query: &str) -> Vec<Breed> {
  if query.is_empty() {
    return breeds.to_vec();
  }

  let query = query.to_lowercase();
  breeds
    .iter()
    .filter(|b| b.name.to_lowercase().contains(&query))
    .cloned()
    .collect()
}

struct SyncState {
  breeds: Vec<Breed>,
  cursor: PageCursor,
  search: String,
  is_loading: bool,
  error: Option<String>,
}

/// Reconciles the local store and the remote source into one growing,
/// deduplicated, name-sorted collection.
pub struct SyncCoordinator<S, R> {
  store: S,
  remote: R,
  page_size: usize,
  state: Mutex<SyncState>,
  observer: Mutex<Option<Observer>>,
}

impl<S: BreedStore, R: RemoteSource> SyncCoordinator<S, R> {
  pub fn new(store: S, remote: R, page_size: usize) -> Self {
    Self {
      store,
      remote,
      page_size,
      state: Mutex::new(SyncState {
        breeds: Vec::new(),
        cursor: PageCursor::new(page_size),
        search: String::new(),
        is_loading: false,
        error: None,
      }),
      observer: Mutex::new(None),
    }
  }

  /// Register the observer called after state changes. Replaces any
  /// previous observer.
  pub fn subscribe<F>(&self, observer: F)
  where
    F: Fn(SyncEvent) + Send + Sync + 'static,
  {
    *lock_ignoring_poison(&self.observer) = Some(Box::new(observer));
  }

  fn notify(&self) {
    if let Some(observer) = lock_ignoring_poison(&self.observer).as_ref() {
      observer(SyncEvent::Updated);
    }
  }

  fn lock_state(&self) -> MutexGuard<'_, SyncState> {
    lock_ignoring_poison(&self.state)
  }

  /// Take an atomic copy of the published state.
  pub fn snapshot(&self) -> Snapshot {
    let st = self.lock_state();
    Snapshot {
      breeds: st.breeds.clone(),
      search: st.search.clone(),
      is_loading: st.is_loading,
      is_last_page: st.cursor.is_last_page,
      error: st.error.clone(),
    }
  }

  /// Update the search text. Filtering is a pure view concern; this never
  /// touches the cursor and never triggers a fetch.
  pub fn set_search(&self, text: impl Into<String>) {
    self.lock_state().search = text.into();
    self.notify();
  }

  /// Serve the first page from the cache, topping up from the remote
  /// source when the cache holds less than one page. No-op once the
  /// session is initialized; `refresh` starts over.
  pub async fn load_initial(&self) {
    let needs_top_up = {
      let mut st = self.lock_state();
      if st.cursor.has_loaded_initial_data {
        return;
      }

      match self.store.fetch_sorted(Some(self.page_size)) {
        Ok(breeds) => st.breeds = breeds,
        // Local read failures are logged only; the remote top-up below
        // still gives the session a collection to show.
        Err(e) => warn!("failed to read local breeds: {}", e),
      }

      if st.breeds.len() < self.page_size {
        st.cursor.current_page = 0;
        st.cursor.is_last_page = false;
        true
      } else {
        // A previous session cached at least one page; no remote call.
        st.cursor.current_page = 1;
        st.cursor.is_last_page = false;
        false
      }
    };

    if needs_top_up {
      self.load_next_page().await;
    }

    self.lock_state().cursor.has_loaded_initial_data = true;
    self.notify();
  }

  /// Run one cache-or-remote page cycle and publish the result.
  ///
  /// Returns immediately while another cycle is in flight (single flight)
  /// or once the last page was reached. The guard and the user-visible
  /// loading flag are cleared on every exit path.
  pub async fn load_next_page(&self) {
    let (page, expected, known_ids) = {
      let mut st = self.lock_state();
      if st.cursor.is_loading_page || st.cursor.is_last_page {
        return;
      }
      st.cursor.is_loading_page = true;
      if st.cursor.current_page == 0 || st.breeds.is_empty() {
        st.is_loading = true;
      }
      st.error = None;

      let known_ids: HashSet<String> = st
        .breeds
        .iter()
        .map(|b| b.external_id.clone())
        .collect();
      (
        st.cursor.current_page,
        st.cursor.expected_local_count(),
        known_ids,
      )
    };

    let outcome = self.run_page_cycle(page, expected, known_ids).await;

    {
      let mut st = self.lock_state();
      match outcome {
        Ok((breeds, reached_last)) => {
          st.breeds = breeds;
          st.cursor.current_page += 1;
          if reached_last {
            st.cursor.is_last_page = true;
          }
        }
        Err(e) => {
          // Cursor untouched: the next trigger retries the same page.
          warn!("failed to load breeds page {}: {}", page, e);
          st.error = Some(format!("Failed to load breeds: {}", e));
        }
      }
      st.cursor.is_loading_page = false;
      st.is_loading = false;
    }

    self.notify();
  }

  /// The fallible part of a page cycle. On success returns the collection
  /// to publish and whether the remote reported (by coming up short) that
  /// this was the final page.
  async fn run_page_cycle(
    &self,
    page: usize,
    expected: usize,
    known_ids: HashSet<String>,
  ) -> Result<(Vec<Breed>, bool)> {
    let total_local = self.store.count()?;

    if total_local >= expected {
      // Cache already holds this page; no remote traffic.
      let breeds = self.store.fetch_sorted(Some(expected))?;
      return Ok((breeds, false));
    }

    let fetched = self.remote.fetch_page(page, self.page_size).await?;
    let reached_last = fetched.len() < self.page_size;

    let mut added = false;
    for breed in fetched {
      if known_ids.contains(&breed.external_id) {
        continue;
      }
      self.store.insert(&breed)?;
      added = true;
    }
    if added {
      self.store.save()?;
    }

    // Re-read so cached and fresh records come back in one ordering.
    let breeds = self.store.fetch_sorted(Some(expected))?;
    Ok((breeds, reached_last))
  }

  /// Called per visible-item event from the presentation layer. Triggers a
  /// page cycle when `external_id` sits within the last 3 published
  /// positions, unless a search is active or the last page was reached.
  pub async fn load_more_if_needed(&self, external_id: &str) {
    let should_load = {
      let st = self.lock_state();
      if !st.search.is_empty() {
        return;
      }
      let Some(index) = st.breeds.iter().position(|b| b.external_id == external_id) else {
        return;
      };
      index + 3 >= st.breeds.len() && !st.cursor.is_last_page
    };

    if should_load {
      self.load_next_page().await;
    }
  }

  /// Drop the published collection and cursor state, then reload. The only
  /// operation that may shrink the collection; the store keeps everything.
  pub async fn refresh(&self) {
    {
      let mut st = self.lock_state();
      st.breeds.clear();
      st.cursor.reset();
      st.error = None;
    }
    self.load_initial().await;
  }

  /// Flip the favorite flag on a published breed and persist it.
  ///
  /// The in-memory flip always stands; a failed store write is logged and
  /// swallowed so the toggle never fails from the caller's point of view.
  /// Returns the new flag value, or `None` for an unknown id.
  pub fn toggle_favorite(&self, external_id: &str) -> Option<bool> {
    let favorite = {
      let mut st = self.lock_state();
      let breed = st
        .breeds
        .iter_mut()
        .find(|b| b.external_id == external_id)?;
      breed.is_favorite = !breed.is_favorite;
      breed.is_favorite
    };

    if let Err(e) = self.store.set_favorite(external_id, favorite) {
      warn!("failed to persist favorite for {}: {}", external_id, e);
    }

    self.notify();
    Some(favorite)
  }

  /// Unmark a favorite, wherever it came from. Unlike `toggle_favorite`
  /// this also covers breeds beyond the published prefix, which the
  /// favorites view can surface.
  pub fn remove_favorite(&self, external_id: &str) {
    {
      let mut st = self.lock_state();
      if let Some(breed) = st.breeds.iter_mut().find(|b| b.external_id == external_id) {
        breed.is_favorite = false;
      }
    }

    if let Err(e) = self.store.set_favorite(external_id, false) {
      warn!("failed to persist favorite for {}: {}", external_id, e);
    }

    self.notify();
  }

  /// All favorite breeds, name-sorted, straight from the store. Read
  /// failures degrade to an empty list.
  pub fn favorites(&self) -> Vec<Breed> {
    match self.store.fetch_favorites() {
      Ok(breeds) => breeds,
      Err(e) => {
        warn!("failed to fetch favorites: {}", e);
        Vec::new()
      }
    }
  }
}

fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
  match mutex.lock() {
    Ok(guard) => guard,
    Err(poisoned) => poisoned.into_inner(),
  }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
  use std::sync::Arc;

  use color_eyre::eyre::eyre;
  use tokio::sync::Notify;

  use super::*;

  fn breed(id: &str, name: &str) -> Breed {
    Breed {
      external_id: id.to_string(),
      name: name.to_string(),
      origin: None,
      temperament: None,
      description: None,
      image_url: None,
      life_span_min: None,
      life_span_max: None,
      is_favorite: false,
    }
  }

  /// `count` breeds with ids/names that sort in generation order.
  fn breed_page(start: usize, count: usize) -> Vec<Breed> {
    (start..start + count)
      .map(|i| breed(&format!("id{:03}", i), &format!("Breed {:03}", i)))
      .collect()
  }

  #[derive(Default)]
  struct FakeStore {
    committed: Mutex<Vec<Breed>>,
    pending: Mutex<Vec<Breed>>,
    save_count: AtomicUsize,
    fail_set_favorite: AtomicBool,
  }

  impl FakeStore {
    fn with_breeds(breeds: Vec<Breed>) -> Self {
      Self {
        committed: Mutex::new(breeds),
        ..Self::default()
      }
    }

    fn save_count(&self) -> usize {
      self.save_count.load(Ordering::SeqCst)
    }
  }

  impl BreedStore for Arc<FakeStore> {
    fn count(&self) -> Result<usize> {
      Ok(self.committed.lock().unwrap().len())
    }

    fn fetch_sorted(&self, limit: Option<usize>) -> Result<Vec<Breed>> {
      let mut breeds = self.committed.lock().unwrap().clone();
      breeds.sort_by(|a, b| a.name.cmp(&b.name));
      if let Some(limit) = limit {
        breeds.truncate(limit);
      }
      Ok(breeds)
    }

    fn fetch_favorites(&self) -> Result<Vec<Breed>> {
      let mut breeds: Vec<Breed> = self
        .committed
        .lock()
        .unwrap()
        .iter()
        .filter(|b| b.is_favorite)
        .cloned()
        .collect();
      breeds.sort_by(|a, b| a.name.cmp(&b.name));
      Ok(breeds)
    }

    fn insert(&self, breed: &Breed) -> Result<()> {
      self.pending.lock().unwrap().push(breed.clone());
      Ok(())
    }

    fn save(&self) -> Result<()> {
      let mut pending = self.pending.lock().unwrap();
      let mut committed = self.committed.lock().unwrap();
      for breed in pending.drain(..) {
        if committed.iter().any(|b| b.external_id == breed.external_id) {
          continue;
        }
        committed.push(breed);
      }
      self.save_count.fetch_add(1, Ordering::SeqCst);
      Ok(())
    }

    fn set_favorite(&self, external_id: &str, favorite: bool) -> Result<()> {
      if self.fail_set_favorite.load(Ordering::SeqCst) {
        return Err(eyre!("disk full"));
      }
      let mut committed = self.committed.lock().unwrap();
      if let Some(breed) = committed.iter_mut().find(|b| b.external_id == external_id) {
        breed.is_favorite = favorite;
      }
      Ok(())
    }
  }

  #[derive(Default)]
  struct FakeRemote {
    pages: Vec<Vec<Breed>>,
    requested: Mutex<Vec<usize>>,
    fail_next: AtomicBool,
    gated: bool,
    started: Notify,
    release: Notify,
  }

  impl FakeRemote {
    fn with_pages(pages: Vec<Vec<Breed>>) -> Self {
      Self {
        pages,
        ..Self::default()
      }
    }

    fn gated(pages: Vec<Vec<Breed>>) -> Self {
      Self {
        pages,
        gated: true,
        ..Self::default()
      }
    }

    fn calls(&self) -> usize {
      self.requested.lock().unwrap().len()
    }

    fn requested_pages(&self) -> Vec<usize> {
      self.requested.lock().unwrap().clone()
    }
  }

  impl RemoteSource for Arc<FakeRemote> {
    async fn fetch_page(&self, page: usize, _page_size: usize) -> Result<Vec<Breed>> {
      self.requested.lock().unwrap().push(page);
      self.started.notify_one();
      if self.gated {
        self.release.notified().await;
      }
      if self.fail_next.swap(false, Ordering::SeqCst) {
        return Err(eyre!("connection reset"));
      }
      Ok(self.pages.get(page).cloned().unwrap_or_default())
    }
  }

  fn coordinator(
    store: &Arc<FakeStore>,
    remote: &Arc<FakeRemote>,
  ) -> SyncCoordinator<Arc<FakeStore>, Arc<FakeRemote>> {
    SyncCoordinator::new(store.clone(), remote.clone(), 20)
  }

  #[tokio::test]
  async fn test_end_to_end_two_pages_then_noop() {
    let store = Arc::new(FakeStore::default());
    let remote = Arc::new(FakeRemote::with_pages(vec![
      breed_page(0, 20),
      breed_page(20, 5),
    ]));
    let coord = coordinator(&store, &remote);

    coord.load_initial().await;
    let snap = coord.snapshot();
    assert_eq!(snap.breeds.len(), 20);
    assert!(!snap.is_last_page);

    coord.load_next_page().await;
    let snap = coord.snapshot();
    assert_eq!(snap.breeds.len(), 25);
    assert!(snap.is_last_page);

    // End of data reached: further calls touch neither network nor store.
    coord.load_next_page().await;
    let snap = coord.snapshot();
    assert_eq!(snap.breeds.len(), 25);
    assert_eq!(remote.calls(), 2);
    assert_eq!(store.save_count(), 2);
  }

  #[tokio::test]
  async fn test_collection_growth_is_monotonic() {
    let store = Arc::new(FakeStore::default());
    let remote = Arc::new(FakeRemote::with_pages(vec![
      breed_page(0, 20),
      breed_page(20, 20),
      breed_page(40, 3),
    ]));
    let coord = coordinator(&store, &remote);

    coord.load_initial().await;
    let mut last_len = coord.snapshot().breeds.len();

    for _ in 0..5 {
      coord.load_next_page().await;
      let len = coord.snapshot().breeds.len();
      assert!(len >= last_len);
      last_len = len;
    }

    assert_eq!(last_len, 43);
    assert!(coord.snapshot().is_last_page);
  }

  #[tokio::test]
  async fn test_sufficient_cache_skips_remote() {
    let store = Arc::new(FakeStore::with_breeds(breed_page(0, 40)));
    let remote = Arc::new(FakeRemote::default());
    let coord = coordinator(&store, &remote);

    coord.load_initial().await;
    assert_eq!(coord.snapshot().breeds.len(), 20);

    coord.load_next_page().await;
    assert_eq!(coord.snapshot().breeds.len(), 40);

    assert_eq!(remote.calls(), 0);
  }

  #[tokio::test]
  async fn test_published_collection_stays_sorted() {
    // Remote pages arrive unsorted; publishing re-reads the store's
    // name-sorted view.
    let mut page = breed_page(0, 5);
    page.reverse();
    let store = Arc::new(FakeStore::default());
    let remote = Arc::new(FakeRemote::with_pages(vec![page]));
    let coord = coordinator(&store, &remote);

    coord.load_initial().await;

    let names: Vec<String> = coord.snapshot().breeds.iter().map(|b| b.name.clone()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
  }

  #[tokio::test]
  async fn test_single_flight_one_remote_call_one_save() {
    let store = Arc::new(FakeStore::default());
    let remote = Arc::new(FakeRemote::gated(vec![breed_page(0, 20)]));
    let coord = Arc::new(coordinator(&store, &remote));

    let first = {
      let coord = coord.clone();
      tokio::spawn(async move { coord.load_next_page().await })
    };

    // Wait until the first cycle is inside the remote call, then issue a
    // second trigger. The guard must turn it into an immediate no-op.
    remote.started.notified().await;
    coord.load_next_page().await;

    remote.release.notify_one();
    first.await.unwrap();

    assert_eq!(remote.calls(), 1);
    assert_eq!(store.save_count(), 1);
    assert_eq!(coord.snapshot().breeds.len(), 20);
  }

  #[tokio::test]
  async fn test_error_leaves_cursor_retryable() {
    let store = Arc::new(FakeStore::default());
    let remote = Arc::new(FakeRemote::with_pages(vec![breed_page(0, 10)]));
    remote.fail_next.store(true, Ordering::SeqCst);
    let coord = coordinator(&store, &remote);

    coord.load_next_page().await;
    let snap = coord.snapshot();
    assert!(snap.error.is_some());
    assert!(snap.breeds.is_empty());
    assert!(!snap.is_last_page);

    // The retry asks for the same page and clears the error.
    coord.load_next_page().await;
    let snap = coord.snapshot();
    assert!(snap.error.is_none());
    assert_eq!(snap.breeds.len(), 10);
    assert_eq!(remote.requested_pages(), vec![0, 0]);
  }

  #[tokio::test]
  async fn test_load_initial_is_idempotent() {
    let store = Arc::new(FakeStore::default());
    let remote = Arc::new(FakeRemote::with_pages(vec![breed_page(0, 5)]));
    let coord = coordinator(&store, &remote);

    coord.load_initial().await;
    coord.load_initial().await;

    assert_eq!(remote.calls(), 1);
    assert_eq!(coord.snapshot().breeds.len(), 5);
  }

  #[tokio::test]
  async fn test_remote_duplicates_are_skipped() {
    // Page 1 repeats two breeds from page 0.
    let mut second_page = breed_page(18, 2);
    second_page.extend(breed_page(20, 3));
    let store = Arc::new(FakeStore::default());
    let remote = Arc::new(FakeRemote::with_pages(vec![
      breed_page(0, 20),
      second_page,
    ]));
    let coord = coordinator(&store, &remote);

    coord.load_initial().await;
    coord.load_next_page().await;

    let snap = coord.snapshot();
    assert_eq!(snap.breeds.len(), 23);
    let ids: HashSet<&str> = snap.breeds.iter().map(|b| b.external_id.as_str()).collect();
    assert_eq!(ids.len(), 23);
  }

  #[tokio::test]
  async fn test_load_more_triggers_near_tail_only() {
    let store = Arc::new(FakeStore::with_breeds(breed_page(0, 20)));
    let remote = Arc::new(FakeRemote::with_pages(vec![
      breed_page(0, 20),
      breed_page(20, 5),
    ]));
    let coord = coordinator(&store, &remote);

    coord.load_initial().await;
    assert_eq!(remote.calls(), 0);

    // Item 10 of 20 is not within the look-ahead margin.
    coord.load_more_if_needed("id010").await;
    assert_eq!(remote.calls(), 0);

    // Item 17 is the third from the end.
    coord.load_more_if_needed("id017").await;
    assert_eq!(remote.calls(), 1);
    assert_eq!(coord.snapshot().breeds.len(), 25);
  }

  #[tokio::test]
  async fn test_load_more_ignores_unknown_id() {
    let store = Arc::new(FakeStore::with_breeds(breed_page(0, 20)));
    let remote = Arc::new(FakeRemote::with_pages(vec![breed_page(20, 5)]));
    let coord = coordinator(&store, &remote);

    coord.load_initial().await;
    coord.load_more_if_needed("no-such-breed").await;

    assert_eq!(remote.calls(), 0);
  }

  #[tokio::test]
  async fn test_active_search_freezes_pagination() {
    let store = Arc::new(FakeStore::with_breeds(breed_page(0, 20)));
    let remote = Arc::new(FakeRemote::with_pages(vec![
      breed_page(0, 20),
      breed_page(20, 5),
    ]));
    let coord = coordinator(&store, &remote);

    coord.load_initial().await;
    coord.set_search("breed");

    coord.load_more_if_needed("id019").await;
    assert_eq!(remote.calls(), 0);

    // Clearing the search re-enables prefetching.
    coord.set_search("");
    coord.load_more_if_needed("id019").await;
    assert_eq!(remote.calls(), 1);
  }

  #[tokio::test]
  async fn test_refresh_restarts_from_first_page() {
    let store = Arc::new(FakeStore::default());
    let remote = Arc::new(FakeRemote::with_pages(vec![
      breed_page(0, 20),
      breed_page(20, 5),
    ]));
    let coord = coordinator(&store, &remote);

    coord.load_initial().await;
    coord.load_next_page().await;
    assert_eq!(coord.snapshot().breeds.len(), 25);

    coord.refresh().await;

    // Everything is cached by now, so the reload is purely local.
    let snap = coord.snapshot();
    assert_eq!(snap.breeds.len(), 20);
    assert!(!snap.is_last_page);
    assert_eq!(remote.calls(), 2);
  }

  #[tokio::test]
  async fn test_toggle_favorite_persists() {
    let store = Arc::new(FakeStore::with_breeds(breed_page(0, 20)));
    let remote = Arc::new(FakeRemote::default());
    let coord = coordinator(&store, &remote);

    coord.load_initial().await;

    assert_eq!(coord.toggle_favorite("id003"), Some(true));
    assert_eq!(coord.favorites().len(), 1);
    assert_eq!(coord.favorites()[0].external_id, "id003");

    assert_eq!(coord.toggle_favorite("id003"), Some(false));
    assert!(coord.favorites().is_empty());

    assert_eq!(coord.toggle_favorite("missing"), None);
  }

  #[tokio::test]
  async fn test_toggle_favorite_keeps_flip_on_store_failure() {
    let store = Arc::new(FakeStore::with_breeds(breed_page(0, 20)));
    let remote = Arc::new(FakeRemote::default());
    let coord = coordinator(&store, &remote);

    coord.load_initial().await;
    store.fail_set_favorite.store(true, Ordering::SeqCst);

    assert_eq!(coord.toggle_favorite("id003"), Some(true));

    // The published collection shows the flip even though the write failed.
    let snap = coord.snapshot();
    let breed = snap.breeds.iter().find(|b| b.external_id == "id003").unwrap();
    assert!(breed.is_favorite);
    assert!(snap.error.is_none());
  }

  #[tokio::test]
  async fn test_remove_favorite_covers_unpublished_breeds() {
    let mut breeds = breed_page(0, 25);
    breeds[24].is_favorite = true;
    let store = Arc::new(FakeStore::with_breeds(breeds));
    let remote = Arc::new(FakeRemote::default());
    let coord = coordinator(&store, &remote);

    // Only the first 20 are published; id024 is a favorite beyond them.
    coord.load_initial().await;
    assert_eq!(coord.favorites().len(), 1);

    coord.remove_favorite("id024");
    assert!(coord.favorites().is_empty());
  }

  #[tokio::test]
  async fn test_observer_fires_on_cycle_completion() {
    let store = Arc::new(FakeStore::default());
    let remote = Arc::new(FakeRemote::with_pages(vec![breed_page(0, 5)]));
    let coord = coordinator(&store, &remote);

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    coord.subscribe(move |_| {
      counter.fetch_add(1, Ordering::SeqCst);
    });

    coord.load_initial().await;
    assert!(fired.load(Ordering::SeqCst) > 0);
  }

  #[test]
  fn test_filter_matches_case_insensitively() {
    let breeds = vec![
      breed("1", "Bengal"),
      breed("2", "Persian"),
      breed("3", "Maine Coon"),
    ];

    let filtered = filter_by_name(&breeds, "bengal");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Bengal");

    let filtered = filter_by_name(&breeds, "BENGAL");
    assert_eq!(filtered.len(), 1);
  }

  #[test]
  fn test_filter_empty_query_keeps_everything() {
    let breeds = vec![breed("1", "Bengal"), breed("2", "Persian")];
    assert_eq!(filter_by_name(&breeds, "").len(), 2);
  }

  #[test]
  fn test_filter_substring_match() {
    let breeds = vec![breed("1", "Bengal"), breed("3", "Maine Coon")];
    let filtered = filter_by_name(&breeds, "coon");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Maine Coon");
  }
}
