//! Small utility helpers used across modules.

/// True if unicode char belongs to CJK ranges.
/// Useful for deciding whether a surface form is a Han word at all.
pub fn is_cjk(ch: char) -> bool {
  (ch >= '\u{4E00}' && ch <= '\u{9FFF}')
    || (ch >= '\u{3400}' && ch <= '\u{4DBF}')
    || (ch >= '\u{20000}' && ch <= '\u{2A6DF}')
    || (ch >= '\u{2A700}' && ch <= '\u{2B73F}')
    || (ch >= '\u{2B740}' && ch <= '\u{2B81F}')
    || (ch >= '\u{2B820}' && ch <= '\u{2CEAF}')
    || (ch >= '\u{F900}' && ch <= '\u{FAFF}')
}

/// True if the string contains at least one Han character.
pub fn has_cjk(s: &str) -> bool {
  s.chars().any(is_cjk)
}

/// Split a delimited multi-value cell on full-width or ordinary comma/pipe,
/// trimming each piece and dropping empties. Used for alternate-form columns.
pub fn split_multi_value(cell: &str) -> Vec<String> {
  cell
    .split(['，', '、', '|', ','])
    .map(|s| s.trim())
    .filter(|s| !s.is_empty())
    .map(|s| s.to_string())
    .collect()
}

/// Split one CSV row into fields, honoring double-quoted cells so that an
/// ordinary comma inside a quoted alternate-forms column does not break the
/// row apart. No escape handling beyond doubled quotes; rows here are simple.
pub fn split_csv_row(line: &str) -> Vec<String> {
  let mut fields = Vec::new();
  let mut cur = String::new();
  let mut in_quotes = false;
  let mut chars = line.chars().peekable();
  while let Some(ch) = chars.next() {
    match ch {
      '"' => {
        if in_quotes && chars.peek() == Some(&'"') {
          cur.push('"');
          chars.next();
        } else {
          in_quotes = !in_quotes;
        }
      }
      ',' if !in_quotes => {
        fields.push(cur.trim().to_string());
        cur.clear();
      }
      _ => cur.push(ch),
    }
  }
  fields.push(cur.trim().to_string());
  fields
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge source-file payloads.
#[allow(dead_code)]
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    s.to_string()
  } else {
    let mut end = max;
    while !s.is_char_boundary(end) {
      end -= 1;
    }
    format!("{}… ({} bytes total)", &s[..end], s.len())
  }
}
