//! Structured multi-field vocabulary parser (JSON array of records).
//!
//! Each record carries a free-form `level-tags` list, one or more surface
//! `forms` (first form is canonical, the rest become alternates), and nested
//! meaning/pronunciation/classifier/part-of-speech sub-fields. This is the
//! enrichment-designated source: its auxiliary fields overwrite wholesale at
//! merge time.

use serde::Deserialize;
use tracing::warn;

use crate::domain::{LexicalRecord, SRC_STRUCTURED};
use crate::level::{modern_level_from_tags, priority_for_level};

#[derive(Debug, Default, Deserialize)]
struct RawEntry {
  #[serde(default, rename = "level-tags")]
  level_tags: Vec<String>,
  #[serde(default)]
  forms: Vec<RawForm>,
  #[serde(default)]
  radical: String,
  #[serde(default)]
  frequency: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct RawForm {
  #[serde(default)]
  form: String,
  #[serde(default)]
  traditional: String,
  #[serde(default)]
  transcriptions: RawTranscriptions,
  #[serde(default)]
  meanings: Vec<String>,
  #[serde(default)]
  classifiers: Vec<String>,
  #[serde(default)]
  pos: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTranscriptions {
  // Canonical key is "pronunciation"; older dumps spell it "pinyin".
  #[serde(default, alias = "pinyin")]
  pronunciation: String,
}

/// Parse a JSON array of structured records. A body that is not valid JSON
/// contributes zero records (logged, not fatal).
pub fn parse(text: &str) -> Vec<LexicalRecord> {
  let raw: Vec<RawEntry> = match serde_json::from_str(text) {
    Ok(v) => v,
    Err(e) => {
      warn!(target: "lexicon", error = %e, "structured vocabulary body is not a JSON array; skipping");
      return Vec::new();
    }
  };
  raw.into_iter().filter_map(convert).collect()
}

fn convert(raw: RawEntry) -> Option<LexicalRecord> {
  // Entries without a usable surface form are dropped.
  let canonical = raw.forms.iter().find(|f| !f.form.trim().is_empty())?;
  let headword = canonical.form.trim().to_string();

  let mut rec = LexicalRecord::new(headword.clone(), SRC_STRUCTURED);
  rec.level = modern_level_from_tags(&raw.level_tags);
  rec.priority_hint = priority_for_level(rec.level);
  rec.pronunciation = canonical.transcriptions.pronunciation.trim().to_string();
  rec.gloss = canonical.meanings.first().cloned().unwrap_or_default();
  rec.all_glosses = canonical.meanings.clone();
  rec.classifiers = canonical.classifiers.clone();
  if !canonical.traditional.trim().is_empty() {
    rec.traditional_form = Some(canonical.traditional.trim().to_string());
  }
  if !raw.radical.trim().is_empty() {
    rec.radical = Some(raw.radical.trim().to_string());
  }
  rec.frequency_rank = raw.frequency;

  // Union parts of speech across all forms; extra forms become alternates.
  for form in &raw.forms {
    for p in &form.pos {
      if !p.trim().is_empty() && !rec.parts_of_speech.iter().any(|x| x == p) {
        rec.parts_of_speech.push(p.clone());
      }
    }
    let f = form.form.trim();
    if !f.is_empty() && f != headword && !rec.alternate_forms.iter().any(|x| x == f) {
      rec.alternate_forms.push(f.to_string());
    }
  }
  Some(rec)
}
