/// A cat breed as the application knows it.
///
/// `external_id` is the breed id assigned by TheCatAPI and doubles as the
/// local store's primary key, so the same breed seen from cache and from the
/// network collapses into one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breed {
  pub external_id: String,
  pub name: String,
  pub origin: Option<String>,
  pub temperament: Option<String>,
  pub description: Option<String>,
  pub image_url: Option<String>,
  pub life_span_min: Option<u32>,
  pub life_span_max: Option<u32>,
  pub is_favorite: bool,
}

impl Breed {
  /// Average life span in years.
  ///
  /// Rounds the midpoint when both bounds are known, falls back to the one
  /// bound that is known, and stays `None` when neither is. A missing bound
  /// never contributes as zero.
  pub fn life_span_average(&self) -> Option<u32> {
    match (self.life_span_min, self.life_span_max) {
      (Some(low), Some(high)) => Some(((low + high) as f64 / 2.0).round() as u32),
      (Some(low), None) => Some(low),
      (None, Some(high)) => Some(high),
      (None, None) => None,
    }
  }
}

/// Mean life span across a set of breeds, formatted to one decimal.
///
/// Each breed contributes its lower bound, or its upper bound when the lower
/// is missing. Breeds without any bound (or a zero bound) are skipped.
/// Returns an em dash when nothing qualifies.
pub fn average_life_span_label(breeds: &[Breed]) -> String {
  let values: Vec<f64> = breeds
    .iter()
    .filter_map(|b| b.life_span_min.or(b.life_span_max))
    .filter(|&v| v > 0)
    .map(f64::from)
    .collect();

  if values.is_empty() {
    return "—".to_string();
  }

  let avg = values.iter().sum::<f64>() / values.len() as f64;
  format!("{:.1}", avg)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn breed(min: Option<u32>, max: Option<u32>) -> Breed {
    Breed {
      external_id: "beng".to_string(),
      name: "Bengal".to_string(),
      origin: None,
      temperament: None,
      description: None,
      image_url: None,
      life_span_min: min,
      life_span_max: max,
      is_favorite: false,
    }
  }

  #[test]
  fn test_average_both_bounds() {
    assert_eq!(breed(Some(12), Some(16)).life_span_average(), Some(14));
  }

  #[test]
  fn test_average_only_min() {
    assert_eq!(breed(Some(12), None).life_span_average(), Some(12));
  }

  #[test]
  fn test_average_only_max() {
    assert_eq!(breed(None, Some(16)).life_span_average(), Some(16));
  }

  #[test]
  fn test_average_no_bounds() {
    assert_eq!(breed(None, None).life_span_average(), None);
  }

  #[test]
  fn test_average_rounds_half_up() {
    // (10 + 15) / 2 = 12.5 -> 13
    assert_eq!(breed(Some(10), Some(15)).life_span_average(), Some(13));
  }

  #[test]
  fn test_label_two_breeds() {
    let breeds = vec![breed(Some(12), Some(16)), breed(Some(10), Some(14))];
    assert_eq!(average_life_span_label(&breeds), "11.0");
  }

  #[test]
  fn test_label_falls_back_to_max() {
    let breeds = vec![breed(None, Some(16))];
    assert_eq!(average_life_span_label(&breeds), "16.0");
  }

  #[test]
  fn test_label_empty() {
    assert_eq!(average_life_span_label(&[]), "—");
  }

  #[test]
  fn test_label_skips_unbounded_breeds() {
    let breeds = vec![breed(None, None), breed(Some(10), Some(12))];
    assert_eq!(average_life_span_label(&breeds), "10.0");
  }
}
