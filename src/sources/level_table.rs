//! Tabular leveled-vocabulary parser.
//!
//! Comma-separated file with a header row naming, in any order: a headword
//! column, an optional alternate-forms column, a numeric level column, and an
//! optional usage-note column. Rows with a non-numeric or missing level are
//! dropped. This source never supplies pronunciation or gloss; those stay
//! empty pending merge with a gloss-bearing source.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::debug;

use crate::domain::{LexicalRecord, SRC_LEVEL_TABLE};
use crate::util::{split_csv_row, split_multi_value};

const HEAD_COLS: [&str; 3] = ["word", "headword", "simplified"];
const ALT_COLS: [&str; 3] = ["alternates", "alternate_forms", "variants"];
const LEVEL_COLS: [&str; 2] = ["level", "hsk"];
const NOTE_COLS: [&str; 3] = ["note", "usage", "usage_note"];

struct Columns {
  head: usize,
  alt: Option<usize>,
  level: usize,
  note: Option<usize>,
}

fn find_col(header: &[String], names: &[&str]) -> Option<usize> {
  header.iter().position(|h| names.contains(&h.to_lowercase().trim()))
}

fn resolve_columns(header: &[String]) -> Option<Columns> {
  Some(Columns {
    head: find_col(header, &HEAD_COLS)?,
    alt: find_col(header, &ALT_COLS),
    level: find_col(header, &LEVEL_COLS)?,
    note: find_col(header, &NOTE_COLS),
  })
}

/// Parse a whole table. Returns one record per distinct surface form; when a
/// form appears more than once (primary vs. alternate collision, duplicate
/// rows) the lower level wins, ties broken by first-seen.
pub fn parse(text: &str) -> Vec<LexicalRecord> {
  let mut lines = text.lines();
  let Some(header_line) = lines.next() else {
    return Vec::new();
  };
  let header = split_csv_row(header_line);
  let Some(cols) = resolve_columns(&header) else {
    debug!(target: "lexicon", header = %header_line, "level table header not recognized; skipping file");
    return Vec::new();
  };

  let mut order: Vec<String> = Vec::new();
  let mut by_form: HashMap<String, LexicalRecord> = HashMap::new();
  let mut keep = |rec: LexicalRecord, order: &mut Vec<String>| {
    match by_form.entry(rec.headword.clone()) {
      Entry::Occupied(mut o) => {
        // Lower level wins; first-seen wins ties.
        let existing = o.get_mut();
        if rec.level < existing.level {
          existing.level = rec.level;
          existing.level_usage_note = rec.level_usage_note;
        }
      }
      Entry::Vacant(v) => {
        order.push(rec.headword.clone());
        v.insert(rec);
      }
    }
  };

  for line in lines {
    if line.trim().is_empty() {
      continue;
    }
    let row = split_csv_row(line);
    let Some(head) = row.get(cols.head).map(|s| s.trim()).filter(|s| !s.is_empty()) else {
      continue;
    };
    let Some(level) = row.get(cols.level).and_then(|s| s.trim().parse::<u8>().ok()) else {
      continue; // non-numeric or missing level drops the row
    };
    let note = cols
      .note
      .and_then(|i| row.get(i))
      .map(|s| s.trim())
      .filter(|s| !s.is_empty())
      .map(|s| s.to_string());

    let mut primary = LexicalRecord::new(head, SRC_LEVEL_TABLE);
    primary.level = Some(level);
    primary.level_usage_note = note.clone();

    let alternates: Vec<String> = cols
      .alt
      .and_then(|i| row.get(i))
      .map(|cell| split_multi_value(cell))
      .unwrap_or_default();
    primary.alternate_forms = alternates.clone();
    keep(primary, &mut order);

    // Each alternate becomes its own record with the same level/usage/tag,
    // so lookups by the alternate form resolve after merge.
    for alt in alternates {
      if alt == head {
        continue;
      }
      let mut rec = LexicalRecord::new(alt, SRC_LEVEL_TABLE);
      rec.level = Some(level);
      rec.level_usage_note = note.clone();
      keep(rec, &mut order);
    }
  }

  order.into_iter().filter_map(|k| by_form.remove(&k)).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_rows_and_expands_alternates() {
    let text = "word,alternates,level,note\n身体,身體,2,\n好,,1,also hao4\n";
    let recs = parse(text);
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0].headword, "身体");
    assert_eq!(recs[0].level, Some(2));
    assert_eq!(recs[0].alternate_forms, vec!["身體"]);
    assert_eq!(recs[1].headword, "身體");
    assert_eq!(recs[1].level, Some(2));
    assert_eq!(recs[2].headword, "好");
    assert_eq!(recs[2].level_usage_note.as_deref(), Some("also hao4"));
    assert!(recs.iter().all(|r| r.gloss.is_empty() && r.pronunciation.is_empty()));
  }

  #[test]
  fn drops_rows_without_numeric_level() {
    let text = "word,level\n你好,1\n谢谢,beginner\n再见,\n";
    let recs = parse(text);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].headword, "你好");
  }

  #[test]
  fn collision_keeps_lower_level_first_seen_order() {
    // 町 appears as an alternate at level 4 and again as a primary at level 2.
    let text = "word,alternates,level\n街道,町,4\n町,,2\n";
    let recs = parse(text);
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[1].headword, "町");
    assert_eq!(recs[1].level, Some(2));
  }

  #[test]
  fn tie_broken_by_first_seen() {
    let text = "word,alternates,level,note\n好,,3,first\n好,,3,second\n";
    let recs = parse(text);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].level_usage_note.as_deref(), Some("first"));
  }

  #[test]
  fn unknown_header_yields_nothing() {
    assert!(parse("a,b,c\n你好,x,1\n").is_empty());
    assert!(parse("").is_empty());
  }
}
