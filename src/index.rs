//! The immutable lexical aggregate: merged entries plus lookup indices.
//!
//! Built once after merge, then shared read-only (behind `Arc`) with every
//! sampler call; no locking is needed downstream.

use std::collections::{BTreeMap, HashMap};

use tracing::info;

use crate::domain::MergedEntry;

pub struct Lexicon {
  entries: Vec<MergedEntry>,
  by_form: HashMap<String, usize>,
  by_level: HashMap<u8, Vec<usize>>,
  unleveled: Vec<usize>,
}

impl Lexicon {
  /// Index a merged entry sequence. An entirely empty merged set is a fatal
  /// configuration error: the pipeline must halt before indexing.
  pub fn build(entries: Vec<MergedEntry>) -> Result<Lexicon, String> {
    if entries.is_empty() {
      return Err("merged lexical set is empty; no source contributed any records".into());
    }

    let mut by_form = HashMap::new();
    let mut by_level: HashMap<u8, Vec<usize>> = HashMap::new();
    let mut unleveled = Vec::new();

    // Headwords claim their key first; alternate forms are absorbed into the
    // lookup map only where they don't collide with a real headword.
    for (i, e) in entries.iter().enumerate() {
      by_form.insert(e.headword.clone(), i);
      match e.level {
        Some(l) => by_level.entry(l).or_default().push(i),
        None => unleveled.push(i),
      }
    }
    for (i, e) in entries.iter().enumerate() {
      for alt in &e.alternate_forms {
        by_form.entry(alt.clone()).or_insert(i);
      }
    }

    let lex = Lexicon { entries, by_form, by_level, unleveled };
    for (level, count) in lex.level_counts() {
      info!(target: "lexicon", level, count, "indexed level bucket");
    }
    info!(target: "lexicon", unleveled = lex.unleveled.len(), total = lex.len(), "lexicon ready");
    Ok(lex)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn entries(&self) -> &[MergedEntry] {
    &self.entries
  }

  pub fn entry(&self, i: usize) -> &MergedEntry {
    &self.entries[i]
  }

  /// Lookup by headword or alternate form.
  pub fn lookup(&self, form: &str) -> Option<&MergedEntry> {
    self.by_form.get(form).map(|&i| &self.entries[i])
  }

  /// Entry indices at exactly `level`, in merge insertion order.
  pub fn at_level(&self, level: u8) -> &[usize] {
    self.by_level.get(&level).map(Vec::as_slice).unwrap_or(&[])
  }

  /// Entry indices with no level, in merge insertion order.
  pub fn unleveled(&self) -> &[usize] {
    &self.unleveled
  }

  /// Sorted per-level counts, for the startup inventory and /levels route.
  pub fn level_counts(&self) -> BTreeMap<u8, usize> {
    self.by_level.iter().map(|(&l, v)| (l, v.len())).collect()
  }
}
