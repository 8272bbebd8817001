//! Slash-delimited gloss dictionary parser (CC-CEDICT style lines).
//!
//! One record per line: `TRADITIONAL SIMPLIFIED [PINYIN] /gloss1/gloss2/`.
//! Comment lines and lines failing the expected shape are skipped, never
//! fatal. Parsing one line is a pure function: line in, zero-or-one record.

use crate::domain::{LexicalRecord, SRC_GLOSS_DICT};
use crate::level::LevelTag;

/// Parse a whole gloss-dictionary file body.
pub fn parse(text: &str) -> Vec<LexicalRecord> {
  parse_tagged(text, SRC_GLOSS_DICT)
}

/// Same as `parse` but with an explicit source tag (seed data reuses the
/// line format under its own tag).
pub fn parse_tagged(text: &str, source_tag: &str) -> Vec<LexicalRecord> {
  text.lines().filter_map(|l| parse_line(l, source_tag)).collect()
}

/// Parse one line; `None` for comments and malformed lines.
pub fn parse_line(line: &str, source_tag: &str) -> Option<LexicalRecord> {
  let line = line.trim();
  if line.is_empty() || line.starts_with('#') {
    return None;
  }

  // TRAD SIMP, then [PINYIN], then /glosses/.
  let bracket_open = line.find('[')?;
  let bracket_close = line[bracket_open..].find(']')? + bracket_open;
  let head = line[..bracket_open].trim();
  let mut head_parts = head.split_whitespace();
  let traditional = head_parts.next()?;
  let simplified = head_parts.next()?;
  if head_parts.next().is_some() {
    return None;
  }
  let pronunciation = line[bracket_open + 1..bracket_close].trim();

  let tail = line[bracket_close + 1..].trim();
  let first_slash = tail.find('/')?;
  let last_slash = tail.rfind('/')?;
  if last_slash <= first_slash {
    return None;
  }
  let glosses: Vec<String> = tail[first_slash + 1..last_slash]
    .split('/')
    .map(|g| g.trim())
    .filter(|g| !g.is_empty())
    .map(|g| g.to_string())
    .collect();
  if glosses.is_empty() {
    return None;
  }

  // Inline level annotations like "(HSK 3)" live inside gloss text in some
  // dictionary dumps; extract the first one and strip them all.
  let mut level = None;
  let mut cleaned = Vec::with_capacity(glosses.len());
  for g in &glosses {
    let (found, stripped) = extract_inline_level(g);
    if level.is_none() {
      level = found;
    }
    if !stripped.is_empty() {
      cleaned.push(stripped);
    }
  }
  if cleaned.is_empty() {
    return None;
  }

  let mut rec = LexicalRecord::new(simplified, source_tag);
  rec.pronunciation = pronunciation.to_string();
  rec.gloss = cleaned.join("/");
  rec.all_glosses = cleaned;
  rec.level = level;
  rec.traditional_form = Some(traditional.to_string());
  if traditional != simplified {
    rec.alternate_forms.push(traditional.to_string());
  }
  Some(rec)
}

/// Pull a parenthesized level annotation ("(HSK3)", "(hsk 5)") out of one
/// gloss, returning the level (if the token converts) and the gloss with the
/// annotation removed.
fn extract_inline_level(gloss: &str) -> (Option<u8>, String) {
  let Some((start, end)) = find_level_annotation(gloss) else {
    return (None, gloss.trim().to_string());
  };
  let token = gloss[start + 1..end].replace(' ', "");
  let level = LevelTag::parse(&token).ordinal();
  let stripped = format!("{}{}", &gloss[..start], &gloss[end + 1..]);
  (level, stripped.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Byte offsets of the opening and closing parens of the first "(hsk...)"
/// annotation, matched case-insensitively on the original string. Offsets
/// into a lowercased copy would be wrong for characters whose lowercase
/// mapping changes byte length.
fn find_level_annotation(gloss: &str) -> Option<(usize, usize)> {
  for (i, _) in gloss.match_indices('(') {
    let rest = &gloss[i + 1..];
    if !rest.get(..3).map_or(false, |p| p.eq_ignore_ascii_case("hsk")) {
      continue;
    }
    if let Some(rel) = rest.find(')') {
      return Some((i, i + 1 + rel));
    }
  }
  None
}
