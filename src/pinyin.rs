//! Hanzi → Hanyu Pinyin (tone diacritics, space-separated) and the
//! post-merge pronunciation enrichment pass.

use pinyin::ToPinyin;
use tracing::debug;

use crate::domain::MergedEntry;
use crate::util::has_cjk;

/// Convert Chinese text into Hanyu Pinyin with tone diacritics,
/// space-separated. Non-Chinese characters are copied as-is.
///
/// This is intentionally simple: it converts per-character (no word
/// segmentation), so some polyphonic characters may use a default reading.
pub fn to_pinyin_diacritics(text: &str) -> String {
  let mut out = String::with_capacity(text.len() * 2);
  let mut last_was_hanzi = false;
  for ch in text.chars() {
    if let Some(py) = ch.to_pinyin() {
      if last_was_hanzi {
        out.push(' ');
      }
      out.push_str(&py.with_tone().to_string());
      last_was_hanzi = true;
    } else {
      out.push(ch);
      last_was_hanzi = false;
    }
  }
  out
}

/// Fill pronunciation for merged entries that no source supplied one for.
/// Source-supplied pronunciation always wins (fill-only, like the merge).
pub fn enrich_pronunciations(entries: &mut [MergedEntry]) -> usize {
  let mut filled = 0usize;
  for e in entries.iter_mut() {
    if e.pronunciation.is_empty() && has_cjk(&e.headword) {
      e.pronunciation = to_pinyin_diacritics(&e.headword);
      filled += 1;
    }
  }
  debug!(target: "lexicon", filled, "pronunciation enrichment pass done");
  filled
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{LexicalRecord, SRC_LEVEL_TABLE};

  #[test]
  fn converts_with_tone_marks_and_copies_the_rest() {
    assert_eq!(to_pinyin_diacritics("中国人计划 2025！"), "zhōng guó rén jì huà 2025！");
  }

  #[test]
  fn enrichment_fills_only_empty_pronunciations() {
    let mut a = LexicalRecord::new("学校", SRC_LEVEL_TABLE);
    a.level = Some(1);
    let mut b = LexicalRecord::new("好", SRC_LEVEL_TABLE);
    b.pronunciation = "hǎo".into();
    let mut entries = vec![MergedEntry::from_record(a), MergedEntry::from_record(b)];
    let filled = enrich_pronunciations(&mut entries);
    assert_eq!(filled, 1);
    assert_eq!(entries[0].pronunciation, "xué xiào");
    assert_eq!(entries[1].pronunciation, "hǎo");
  }
}
