//! Domain models for the lexical pipeline: pre-merge records, merged entries,
//! and the source tags that drive merge precedence.

use serde::{Deserialize, Serialize};

/// Source tags, in the fixed order the merge engine consumes them.
/// Frequency lists use a derived tag (`freq_topN`), see `sources::frequency`.
pub const SRC_GLOSS_DICT: &str = "gloss_dict";
pub const SRC_STRUCTURED: &str = "structured";
pub const SRC_LEVEL_TABLE: &str = "level_table";
pub const SRC_SEED: &str = "seed";

/// Coarse pedagogical importance, used to front-load words within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityHint {
  VeryHigh,
  High,
  None,
}
impl Default for PriorityHint {
  fn default() -> Self { PriorityHint::None }
}
impl PriorityHint {
  /// True for the very_high/high subset that gets moved to the pool front.
  pub fn is_elevated(self) -> bool {
    matches!(self, PriorityHint::VeryHigh | PriorityHint::High)
  }
}

/// One lexical entry as produced by a single source parser, before merge.
///
/// `headword` (simplified script) is the merge key and must be non-empty;
/// every other field may be empty pending enrichment by another source.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LexicalRecord {
  pub headword: String,
  pub alternate_forms: Vec<String>,
  pub pronunciation: String,
  pub gloss: String,
  pub all_glosses: Vec<String>,
  pub level: Option<u8>,
  pub level_usage_note: Option<String>,
  pub source_tag: String,
  pub priority_hint: PriorityHint,
  pub frequency_rank: Option<u32>,
  pub parts_of_speech: Vec<String>,
  pub radical: Option<String>,
  pub traditional_form: Option<String>,
  pub classifiers: Vec<String>,
}

impl LexicalRecord {
  pub fn new(headword: impl Into<String>, source_tag: impl Into<String>) -> Self {
    Self {
      headword: headword.into(),
      source_tag: source_tag.into(),
      ..Default::default()
    }
  }
}

/// A merged lexical entry: same shape as `LexicalRecord` with conflicts
/// resolved, plus the union of every contributing source tag.
///
/// Serialized as a flat record with optional string fields present-but-empty,
/// so every entry in the output sequence carries the same field set.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MergedEntry {
  pub headword: String,
  pub alternate_forms: Vec<String>,
  pub pronunciation: String,
  pub gloss: String,
  pub all_glosses: Vec<String>,
  pub level: Option<u8>,
  pub level_usage_note: String,
  pub priority_hint: PriorityHint,
  pub frequency_rank: Option<u32>,
  pub parts_of_speech: Vec<String>,
  pub radical: String,
  pub traditional_form: String,
  pub classifiers: Vec<String>,
  pub sources: Vec<String>,
}

impl MergedEntry {
  /// Promote a freshly parsed record into a merged entry (first claim wins
  /// every field; later sources go through the merge engine's precedence).
  pub fn from_record(rec: LexicalRecord) -> Self {
    let mut e = Self {
      headword: rec.headword,
      alternate_forms: rec.alternate_forms,
      pronunciation: rec.pronunciation,
      gloss: rec.gloss,
      all_glosses: rec.all_glosses,
      level: rec.level,
      level_usage_note: rec.level_usage_note.unwrap_or_default(),
      priority_hint: rec.priority_hint,
      frequency_rank: rec.frequency_rank,
      parts_of_speech: rec.parts_of_speech,
      radical: rec.radical.unwrap_or_default(),
      traditional_form: rec.traditional_form.unwrap_or_default(),
      classifiers: rec.classifiers,
      sources: vec![rec.source_tag],
    };
    if e.gloss.is_empty() {
      if let Some(l) = e.level {
        e.gloss = placeholder_gloss(l);
      }
    }
    e
  }
}

/// Placeholder gloss for words contributed by a leveled source but unseen by
/// any gloss-bearing source. Level information must not be lost in the merge.
pub fn placeholder_gloss(level: u8) -> String {
  format!("[level-{} word]", level)
}

/// True if `gloss` was produced by `placeholder_gloss`.
pub fn is_placeholder_gloss(gloss: &str) -> bool {
  gloss.starts_with("[level-") && gloss.ends_with(" word]")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn placeholder_roundtrip() {
    let g = placeholder_gloss(4);
    assert_eq!(g, "[level-4 word]");
    assert!(is_placeholder_gloss(&g));
    assert!(!is_placeholder_gloss("a real gloss"));
  }

  #[test]
  fn from_record_inserts_placeholder_for_leveled_glossless_word() {
    let mut rec = LexicalRecord::new("学校", SRC_LEVEL_TABLE);
    rec.level = Some(1);
    let e = MergedEntry::from_record(rec);
    assert_eq!(e.gloss, "[level-1 word]");
    assert_eq!(e.sources, vec![SRC_LEVEL_TABLE.to_string()]);
  }

  #[test]
  fn from_record_keeps_empty_gloss_for_unleveled_word() {
    let e = MergedEntry::from_record(LexicalRecord::new("学校", SRC_LEVEL_TABLE));
    assert!(e.gloss.is_empty());
  }
}
