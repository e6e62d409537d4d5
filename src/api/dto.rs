//! Serde-deserializable types matching TheCatAPI responses.
//!
//! These types are separate from the domain types so deserialization stays
//! clean while `Breed` carries only what the application needs.

use serde::Deserialize;

use crate::breed::Breed;

/// One breed as returned by `GET /v1/breeds`.
#[derive(Debug, Deserialize)]
pub struct ApiBreed {
  pub id: String,
  pub name: String,
  pub origin: Option<String>,
  pub temperament: Option<String>,
  pub description: Option<String>,
  /// Free text like "12 - 16", parsed into numeric bounds.
  pub life_span: Option<String>,
  pub image: Option<ApiImage>,
}

#[derive(Debug, Deserialize)]
pub struct ApiImage {
  pub url: Option<String>,
}

impl ApiBreed {
  /// Convert into the domain type, parsing the life-span text.
  pub fn into_breed(self) -> Breed {
    let (life_span_min, life_span_max) = parse_life_span(self.life_span.as_deref());

    Breed {
      external_id: self.id,
      name: self.name,
      origin: self.origin,
      temperament: self.temperament,
      description: self.description,
      image_url: self.image.and_then(|img| img.url),
      life_span_min,
      life_span_max,
      is_favorite: false,
    }
  }
}

/// Parse a life-span string into `(min, max)` bounds.
///
/// Scans for runs of 1-3 decimal digits, left to right; a longer run is
/// consumed three digits at a time. Two or more numbers yield
/// `(first, second)`, a single number is both bounds, anything else is
/// `(None, None)`. Malformed input never errors.
pub fn parse_life_span(raw: Option<&str>) -> (Option<u32>, Option<u32>) {
  let Some(raw) = raw else {
    return (None, None);
  };

  fn flush(digits: &mut String, numbers: &mut Vec<u32>) {
    if let Ok(n) = digits.parse::<u32>() {
      numbers.push(n);
    }
    digits.clear();
  }

  let mut numbers: Vec<u32> = Vec::new();
  let mut digits = String::new();

  for ch in raw.chars() {
    if ch.is_ascii_digit() {
      digits.push(ch);
      if digits.len() == 3 {
        flush(&mut digits, &mut numbers);
      }
    } else if !digits.is_empty() {
      flush(&mut digits, &mut numbers);
    }
  }
  if !digits.is_empty() {
    flush(&mut digits, &mut numbers);
  }

  match numbers.len() {
    0 => (None, None),
    1 => (Some(numbers[0]), Some(numbers[0])),
    _ => (Some(numbers[0]), Some(numbers[1])),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_range() {
    assert_eq!(parse_life_span(Some("12 - 16")), (Some(12), Some(16)));
  }

  #[test]
  fn test_parse_single_value() {
    assert_eq!(parse_life_span(Some("14")), (Some(14), Some(14)));
  }

  #[test]
  fn test_parse_invalid() {
    assert_eq!(parse_life_span(Some("invalid")), (None, None));
  }

  #[test]
  fn test_parse_absent() {
    assert_eq!(parse_life_span(None), (None, None));
  }

  #[test]
  fn test_parse_empty() {
    assert_eq!(parse_life_span(Some("")), (None, None));
  }

  #[test]
  fn test_parse_surrounding_text() {
    assert_eq!(
      parse_life_span(Some("from 10 to 15 years")),
      (Some(10), Some(15))
    );
  }

  #[test]
  fn test_parse_ignores_extra_numbers() {
    assert_eq!(parse_life_span(Some("8 - 12 (avg 10)")), (Some(8), Some(12)));
  }

  #[test]
  fn test_parse_long_run_splits_at_three_digits() {
    assert_eq!(parse_life_span(Some("1234")), (Some(123), Some(4)));
  }

  #[test]
  fn test_decode_api_breed() {
    let json = r#"{
      "id": "beng",
      "name": "Bengal",
      "origin": "United States",
      "temperament": "Alert, Agile",
      "description": "Active cat",
      "life_span": "12 - 16",
      "image": { "url": "https://example.com/beng.jpg" }
    }"#;

    let api: ApiBreed = serde_json::from_str(json).unwrap();
    let breed = api.into_breed();

    assert_eq!(breed.external_id, "beng");
    assert_eq!(breed.name, "Bengal");
    assert_eq!(breed.origin.as_deref(), Some("United States"));
    assert_eq!(breed.image_url.as_deref(), Some("https://example.com/beng.jpg"));
    assert_eq!(breed.life_span_min, Some(12));
    assert_eq!(breed.life_span_max, Some(16));
    assert!(!breed.is_favorite);
  }

  #[test]
  fn test_decode_minimal_api_breed() {
    let json = r#"{ "id": "abys", "name": "Abyssinian" }"#;

    let api: ApiBreed = serde_json::from_str(json).unwrap();
    let breed = api.into_breed();

    assert_eq!(breed.life_span_min, None);
    assert_eq!(breed.life_span_max, None);
    assert_eq!(breed.image_url, None);
  }
}
