use crate::breed::{average_life_span_label, Breed};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use super::truncate;

pub fn draw_favorites(frame: &mut Frame, area: Rect, breeds: &[Breed], selected: usize) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Min(1),    // Favorites list
      Constraint::Length(1), // Average life span summary
    ])
    .split(area);

  let block = Block::default()
    .title(format!(" Favorites ({}) ", breeds.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));

  if breeds.is_empty() {
    let paragraph = Paragraph::new("No favorites yet. Press f on a breed to add one.")
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, chunks[0]);
  } else {
    let items: Vec<ListItem> = breeds
      .iter()
      .map(|breed| {
        let line = Line::from(vec![
          Span::styled("★ ", Style::default().fg(Color::Yellow)),
          Span::styled(
            format!("{:<24}", truncate(&breed.name, 24)),
            Style::default().fg(Color::Cyan),
          ),
          Span::raw(" "),
          Span::raw(truncate(breed.origin.as_deref().unwrap_or(""), 20)),
        ]);
        ListItem::new(line)
      })
      .collect();

    let list = List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(list, chunks[0], &mut state);
  }

  let summary = format!(" Average life span: {} years", average_life_span_label(breeds));
  let paragraph = Paragraph::new(summary).style(Style::default().fg(Color::DarkGray));
  frame.render_widget(paragraph, chunks[1]);
}
