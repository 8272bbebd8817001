//! Frequency word-list parser.
//!
//! Tab-separated lines of `sourceWord \t headword \t pronunciation \t gloss`.
//! Lines with fewer than four fields are skipped. Every record is tagged with
//! the frequency band (top-N) of the file it came from; this parser never
//! assigns a level.

use crate::domain::LexicalRecord;

/// Source tag for a frequency list covering the top `band` words.
pub fn band_tag(band: u32) -> String {
  format!("freq_top{}", band)
}

/// Parse one tab-separated frequency list covering the top `band` words.
pub fn parse(text: &str, band: u32) -> Vec<LexicalRecord> {
  let tag = band_tag(band);
  text
    .lines()
    .filter_map(|line| parse_line(line, band, &tag))
    .collect()
}

fn parse_line(line: &str, band: u32, tag: &str) -> Option<LexicalRecord> {
  if line.trim().is_empty() || line.starts_with('#') {
    return None;
  }
  let fields: Vec<&str> = line.split('\t').map(|f| f.trim()).collect();
  if fields.len() < 4 {
    return None;
  }
  let headword = fields[1];
  if headword.is_empty() {
    return None;
  }
  let mut rec = LexicalRecord::new(headword, tag);
  rec.pronunciation = fields[2].to_string();
  rec.gloss = fields[3].to_string();
  rec.frequency_rank = Some(band);
  Some(rec)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_four_field_lines_with_band_tag() {
    let text = "的\t的\tde\t(possessive particle)\n了\t了\tle\t(aspect particle)\n";
    let recs = parse(text, 1000);
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].headword, "的");
    assert_eq!(recs[0].source_tag, "freq_top1000");
    assert_eq!(recs[0].frequency_rank, Some(1000));
    assert_eq!(recs[0].gloss, "(possessive particle)");
    assert!(recs.iter().all(|r| r.level.is_none()));
  }

  #[test]
  fn short_lines_are_skipped() {
    let text = "的\t的\tde\n\n# comment\n好\t好\thao3\tgood\n";
    let recs = parse(text, 2000);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].headword, "好");
  }
}
