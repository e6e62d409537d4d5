use crate::breed::Breed;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use super::truncate;

pub fn draw_breed_list(
  frame: &mut Frame,
  area: Rect,
  breeds: &[Breed],
  selected: usize,
  loading: bool,
  last_page: bool,
) {
  let title = if loading {
    " Breeds (loading...) ".to_string()
  } else if last_page {
    format!(" Breeds ({}, all loaded) ", breeds.len())
  } else {
    format!(" Breeds ({}) ", breeds.len())
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));

  if breeds.is_empty() && !loading {
    let paragraph = ratatui::widgets::Paragraph::new("No breeds found.")
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
    return;
  }

  let items: Vec<ListItem> = breeds
    .iter()
    .map(|breed| {
      let favorite_mark = if breed.is_favorite { "★" } else { " " };
      let life_span = breed
        .life_span_average()
        .map(|avg| format!("{:>2}y", avg))
        .unwrap_or_else(|| "  -".to_string());

      let line = Line::from(vec![
        Span::styled(favorite_mark.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw(" "),
        Span::styled(
          format!("{:<24}", truncate(&breed.name, 24)),
          Style::default().fg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(life_span, Style::default().fg(Color::Green)),
        Span::raw("  "),
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

  frame.render_stateful_widget(list, area, &mut state);
}
