use crate::api::BreedApi;
use crate::breed::Breed;
use crate::event::{Event, EventHandler};
use crate::store::SqliteStore;
use crate::sync::{Snapshot, SyncCoordinator};
use crate::ui;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// The coordinator as wired in production: SQLite cache + TheCatAPI.
pub type Coordinator = SyncCoordinator<SqliteStore, BreedApi>;

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
  Normal,
  Search,
}

/// View state - each variant owns its data
#[derive(Debug)]
pub enum ViewState {
  // Root view
  BreedList {
    selected: usize,
  },

  // Pushed views
  Favorites {
    breeds: Vec<Breed>,
    selected: usize,
  },
  BreedDetail {
    breed: Box<Breed>,
  },
}

/// Main application state
pub struct App {
  /// The sync core; async work happens on spawned tasks sharing this
  coordinator: Arc<Coordinator>,

  /// Navigation stack - the breed list is always at index 0
  view_stack: Vec<ViewState>,

  /// Current input mode
  mode: Mode,

  /// Search input buffer (after pressing /)
  search_input: String,

  /// Last published state, refreshed on sync events
  snapshot: Snapshot,

  /// Event sender for async tasks
  event_tx: mpsc::UnboundedSender<Event>,

  /// Whether to quit
  should_quit: bool,
}

impl App {
  pub fn new(coordinator: Coordinator) -> Self {
    let (tx, _rx) = mpsc::unbounded_channel();

    Self {
      coordinator: Arc::new(coordinator),
      view_stack: vec![ViewState::BreedList { selected: 0 }],
      mode: Mode::Normal,
      search_input: String::new(),
      snapshot: Snapshot::default(),
      event_tx: tx,
      should_quit: false,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Create event handler
    let mut events = EventHandler::new(Duration::from_millis(250));
    self.event_tx = events.sender();

    // Route coordinator notifications into the event loop
    let sync_tx = self.event_tx.clone();
    self.coordinator.subscribe(move |e| {
      let _ = sync_tx.send(Event::Sync(e));
    });

    // Initial data load
    self.spawn(|coordinator| async move { coordinator.load_initial().await });

    // Main loop
    while !self.should_quit {
      // Draw UI
      terminal.draw(|frame| ui::draw(frame, self))?;

      // Handle events
      if let Some(event) = events.next().await {
        self.handle_event(event);
      }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
  }

  /// Run a coordinator operation on a background task.
  fn spawn<F, Fut>(&self, op: F)
  where
    F: FnOnce(Arc<Coordinator>) -> Fut,
    Fut: std::future::Future<Output = ()> + Send + 'static,
  {
    tokio::spawn(op(self.coordinator.clone()));
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Tick => {} // UI refresh happens automatically
      Event::Sync(_) => self.refresh_snapshot(),
    }
  }

  /// Pull the latest published state and reconcile view-local data with it.
  fn refresh_snapshot(&mut self) {
    self.snapshot = self.coordinator.snapshot();

    let visible_len = self.snapshot.visible().len();
    for view in &mut self.view_stack {
      match view {
        ViewState::BreedList { selected } => {
          *selected = (*selected).min(visible_len.saturating_sub(1));
        }
        ViewState::Favorites { breeds, selected } => {
          *breeds = self.coordinator.favorites();
          *selected = (*selected).min(breeds.len().saturating_sub(1));
        }
        ViewState::BreedDetail { breed } => {
          if let Some(current) = self
            .snapshot
            .breeds
            .iter()
            .find(|b| b.external_id == breed.external_id)
          {
            *breed = Box::new(current.clone());
          }
        }
      }
    }
  }

  fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
    match self.mode {
      Mode::Normal => self.handle_normal_mode_key(key),
      Mode::Search => self.handle_search_mode_key(key),
    }
  }

  fn handle_normal_mode_key(&mut self, key: crossterm::event::KeyEvent) {
    match key.code {
      // Quit
      KeyCode::Char('q') => {
        if self.view_stack.len() > 1 {
          self.view_stack.pop();
        } else {
          self.should_quit = true;
        }
      }
      KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        self.should_quit = true;
      }

      // Navigation
      KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
      KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
      KeyCode::Enter => self.enter_selected(),
      KeyCode::Esc => {
        if self.view_stack.len() > 1 {
          self.view_stack.pop();
        }
      }

      // Actions
      KeyCode::Char('f') => self.toggle_selected_favorite(),
      KeyCode::Char('F') => self.open_favorites(),
      KeyCode::Char('r') => {
        self.spawn(|coordinator| async move { coordinator.refresh().await });
      }

      // Mode switch
      KeyCode::Char('/') => {
        self.mode = Mode::Search;
        self.search_input.clear();
        self.coordinator.set_search("");
      }

      _ => {}
    }
  }

  fn handle_search_mode_key(&mut self, key: crossterm::event::KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.mode = Mode::Normal;
        self.search_input.clear();
        self.coordinator.set_search("");
      }
      KeyCode::Enter => {
        // Keep the filter and return to normal mode
        self.mode = Mode::Normal;
      }
      KeyCode::Backspace => {
        self.search_input.pop();
        self.coordinator.set_search(self.search_input.clone());
      }
      KeyCode::Char(c) => {
        self.search_input.push(c);
        self.coordinator.set_search(self.search_input.clone());
      }
      _ => {}
    }
  }

  fn move_selection(&mut self, delta: i32) {
    let visible_len = self.snapshot.visible().len();

    match self.view_stack.last_mut() {
      Some(ViewState::BreedList { selected }) => {
        if visible_len > 0 {
          *selected = (*selected as i32 + delta).rem_euclid(visible_len as i32) as usize;
        }
      }
      Some(ViewState::Favorites { breeds, selected }) => {
        let len = breeds.len();
        if len > 0 {
          *selected = (*selected as i32 + delta).rem_euclid(len as i32) as usize;
        }
      }
      _ => {}
    }

    if matches!(self.view_stack.last(), Some(ViewState::BreedList { .. })) {
      self.prefetch_from_selection();
    }
  }

  /// Tell the coordinator which breed just became the cursor position so it
  /// can prefetch the next page near the tail of the list.
  fn prefetch_from_selection(&self) {
    let Some(ViewState::BreedList { selected }) = self.view_stack.last() else {
      return;
    };
    let Some(breed) = self.snapshot.visible().get(*selected).cloned() else {
      return;
    };

    self.spawn(|coordinator| async move {
      coordinator.load_more_if_needed(&breed.external_id).await;
    });
  }

  fn enter_selected(&mut self) {
    let breed = match self.view_stack.last() {
      Some(ViewState::BreedList { selected }) => self.snapshot.visible().get(*selected).cloned(),
      Some(ViewState::Favorites { breeds, selected }) => breeds.get(*selected).cloned(),
      _ => None,
    };

    if let Some(breed) = breed {
      self.view_stack.push(ViewState::BreedDetail {
        breed: Box::new(breed),
      });
    }
  }

  fn toggle_selected_favorite(&mut self) {
    match self.view_stack.last_mut() {
      Some(ViewState::BreedList { selected }) => {
        if let Some(breed) = self.snapshot.visible().get(*selected) {
          self.coordinator.toggle_favorite(&breed.external_id);
        }
      }
      Some(ViewState::Favorites { breeds, selected }) => {
        if let Some(breed) = breeds.get(*selected) {
          self.coordinator.remove_favorite(&breed.external_id);
        }
      }
      Some(ViewState::BreedDetail { breed }) => {
        if let Some(favorite) = self.coordinator.toggle_favorite(&breed.external_id) {
          breed.is_favorite = favorite;
        }
      }
      None => {}
    }
  }

  fn open_favorites(&mut self) {
    // Don't stack favorites on favorites
    if matches!(self.view_stack.last(), Some(ViewState::Favorites { .. })) {
      return;
    }

    self.view_stack.push(ViewState::Favorites {
      breeds: self.coordinator.favorites(),
      selected: 0,
    });
  }

  // Accessors for UI rendering
  pub fn current_view(&self) -> Option<&ViewState> {
    self.view_stack.last()
  }

  pub fn mode(&self) -> &Mode {
    &self.mode
  }

  pub fn search_input(&self) -> &str {
    &self.search_input
  }

  pub fn snapshot(&self) -> &Snapshot {
    &self.snapshot
  }

  /// The breed collection as currently filtered for display.
  pub fn visible_breeds(&self) -> Vec<Breed> {
    self.snapshot.visible()
  }
}
