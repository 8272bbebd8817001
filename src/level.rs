//! Level notation normalization.
//!
//! Sources spell proficiency levels in several conventions: bare numerals,
//! "hskN" labels, modern "new-N" tokens, and a "7 or above" band. Each known
//! convention is one variant of `LevelTag`, so precedence and cascade logic
//! can be tested against the closed set instead of ad hoc string matching.

use crate::domain::PriorityHint;

/// Highest ordinal on the normalized scale; the "7 or above" band maps here.
pub const MAX_LEVEL: u8 = 7;

/// One recognized level notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelTag {
  /// Bare numeral or "hskN" label, e.g. "3", "hsk3", "HSK-3".
  Numeric(u8),
  /// Modern convention, e.g. "new-2".
  Modern(u8),
  /// "Level 7 or above" band, e.g. "new-7+", "new-7-9".
  BandSevenPlus,
  /// Anything else ("old-3", usage notes, free text).
  Unknown,
}

impl LevelTag {
  pub fn parse(token: &str) -> LevelTag {
    let t = token.trim().to_lowercase();
    if t.is_empty() {
      return LevelTag::Unknown;
    }
    if let Some(rest) = t.strip_prefix("new-") {
      return match rest {
        "7+" | "7-9" | "7plus" => LevelTag::BandSevenPlus,
        _ => match rest.parse::<u8>() {
          Ok(n) if (1..=MAX_LEVEL).contains(&n) => LevelTag::Modern(n),
          _ => LevelTag::Unknown,
        },
      };
    }
    let bare = t.strip_prefix("hsk").map(|r| r.trim_start_matches('-')).unwrap_or(&t);
    match bare.parse::<u8>() {
      Ok(n) if (1..=MAX_LEVEL).contains(&n) => LevelTag::Numeric(n),
      _ => LevelTag::Unknown,
    }
  }

  /// Ordinal on the normalized 1..=7 scale, if this tag carries one.
  pub fn ordinal(self) -> Option<u8> {
    match self {
      LevelTag::Numeric(n) | LevelTag::Modern(n) => Some(n),
      LevelTag::BandSevenPlus => Some(MAX_LEVEL),
      LevelTag::Unknown => None,
    }
  }
}

/// Scan a level-tag list for modern-convention tokens; first convertible
/// token wins. Non-modern tokens (e.g. legacy "old-N") are ignored here.
pub fn modern_level_from_tags<S: AsRef<str>>(tags: &[S]) -> Option<u8> {
  tags.iter().find_map(|t| match LevelTag::parse(t.as_ref()) {
    LevelTag::Modern(n) => Some(n),
    LevelTag::BandSevenPlus => Some(MAX_LEVEL),
    _ => None,
  })
}

/// Priority derivation: ordinal levels <= 4 are core curriculum words.
pub fn priority_for_level(level: Option<u8>) -> PriorityHint {
  match level {
    Some(n) if n <= 4 => PriorityHint::VeryHigh,
    Some(_) => PriorityHint::High,
    None => PriorityHint::None,
  }
}

/// Parse a caller-facing proficiency label ("hsk1".."hsk7" or a bare
/// ordinal). Unrecognized labels return None and samplers fall back to the
/// whole-set default pools.
pub fn parse_level_label(label: &str) -> Option<u8> {
  match LevelTag::parse(label) {
    LevelTag::Unknown => None,
    tag => tag.ordinal(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_known_conventions() {
    assert_eq!(LevelTag::parse("3"), LevelTag::Numeric(3));
    assert_eq!(LevelTag::parse("HSK-5"), LevelTag::Numeric(5));
    assert_eq!(LevelTag::parse("hsk2"), LevelTag::Numeric(2));
    assert_eq!(LevelTag::parse("new-4"), LevelTag::Modern(4));
    assert_eq!(LevelTag::parse("new-7+"), LevelTag::BandSevenPlus);
    assert_eq!(LevelTag::parse("new-7-9"), LevelTag::BandSevenPlus);
    assert_eq!(LevelTag::parse("old-3"), LevelTag::Unknown);
    assert_eq!(LevelTag::parse("media"), LevelTag::Unknown);
  }

  #[test]
  fn band_seven_plus_normalizes_to_seven() {
    assert_eq!(LevelTag::BandSevenPlus.ordinal(), Some(7));
  }

  #[test]
  fn first_convertible_modern_tag_wins() {
    let tags = ["old-2", "new-3", "new-1"];
    assert_eq!(modern_level_from_tags(&tags), Some(3));
    let none: [&str; 2] = ["old-2", "media"];
    assert_eq!(modern_level_from_tags(&none), None);
  }

  #[test]
  fn priority_mapping() {
    assert_eq!(priority_for_level(Some(1)), PriorityHint::VeryHigh);
    assert_eq!(priority_for_level(Some(4)), PriorityHint::VeryHigh);
    assert_eq!(priority_for_level(Some(5)), PriorityHint::High);
    assert_eq!(priority_for_level(None), PriorityHint::None);
  }

  #[test]
  fn level_labels() {
    assert_eq!(parse_level_label("hsk3"), Some(3));
    assert_eq!(parse_level_label("7"), Some(7));
    assert_eq!(parse_level_label("beginner"), None);
  }
}
