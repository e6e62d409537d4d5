mod views;

use crate::app::{App, Mode, ViewState};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Min(1),    // Main content
      Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

  // Draw current view
  if let Some(view) = app.current_view() {
    match view {
      ViewState::BreedList { selected } => {
        let breeds = app.visible_breeds();
        let snapshot = app.snapshot();
        views::breed_list::draw_breed_list(
          frame,
          chunks[0],
          &breeds,
          *selected,
          snapshot.is_loading,
          snapshot.is_last_page,
        );
      }
      ViewState::Favorites { breeds, selected } => {
        views::favorites::draw_favorites(frame, chunks[0], breeds, *selected);
      }
      ViewState::BreedDetail { breed } => {
        views::breed_detail::draw_breed_detail(frame, chunks[0], breed);
      }
    }
  }

  // Draw status bar
  draw_status_bar(frame, chunks[1], app);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
  let (content, style) = match app.mode() {
    Mode::Normal => {
      if let Some(error) = &app.snapshot().error {
        (error.clone(), Style::default().fg(Color::Red))
      } else {
        let hint =
          " /:search  j/k:nav  Enter:details  f:favorite  F:favorites  r:refresh  q:back  Ctrl-C:quit";
        (hint.to_string(), Style::default().fg(Color::DarkGray))
      }
    }
    Mode::Search => {
      let search = format!("/{}", app.search_input());
      (search, Style::default().fg(Color::Cyan))
    }
  };

  let paragraph = Paragraph::new(content).style(style);
  frame.render_widget(paragraph, area);
}
