use crate::breed::Breed;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn draw_breed_detail(frame: &mut Frame, area: Rect, breed: &Breed) {
  let favorite_mark = if breed.is_favorite { " ★" } else { "" };
  let block = Block::default()
    .title(format!(" {}{} ", breed.name, favorite_mark))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));

  let mut lines: Vec<Line> = Vec::new();

  let mut field = |label: &str, value: Option<String>| {
    if let Some(value) = value {
      lines.push(Line::from(vec![
        Span::styled(format!("{:<12}", label), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
      ]));
    }
  };

  field("Origin", breed.origin.clone());
  field("Temperament", breed.temperament.clone());
  field(
    "Life span",
    match (breed.life_span_min, breed.life_span_max) {
      (Some(low), Some(high)) if low != high => Some(format!("{} - {} years", low, high)),
      _ => breed.life_span_average().map(|avg| format!("{} years", avg)),
    },
  );
  field(
    "Average",
    breed.life_span_average().map(|avg| format!("{} years", avg)),
  );
  field("Image", breed.image_url.clone());

  if let Some(description) = &breed.description {
    lines.push(Line::raw(""));
    lines.push(Line::raw(description.clone()));
  }

  let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
  frame.render_widget(paragraph, area);
}
