//! Merge engine: combines `LexicalRecord`s keyed by headword across all
//! sources under a fixed per-field precedence policy.
//!
//! Precedence, applied per field:
//!   - level: first claim sets it; a later claim only wins by being smaller
//!     (among conflicting claims the smallest ordinal survives)
//!   - pronunciation / gloss: fill-only (a placeholder gloss counts as empty)
//!   - priority: a very_high claim always overrides; otherwise fill-only
//!   - auxiliary enrichment fields (frequency, pos, radical, traditional,
//!     meanings list, classifiers): an enrichment-designated source
//!     overwrites them wholesale, later enrichment sources win; any other
//!     source only fills gaps
//!   - sources: always the union
//!
//! Insertion order is preserved; merging the same source set twice yields an
//! identical entry sequence.

use std::collections::{HashMap, HashSet};

use tracing::info;

use crate::domain::{is_placeholder_gloss, placeholder_gloss, LexicalRecord, MergedEntry, PriorityHint};

pub struct MergeEngine {
  entries: Vec<MergedEntry>,
  by_headword: HashMap<String, usize>,
  enrichment_sources: HashSet<String>,
}

impl MergeEngine {
  /// `enrichment_sources` names the tags whose auxiliary fields are treated
  /// as canonical (wholesale overwrite, last one processed wins).
  pub fn new(enrichment_sources: &[String]) -> Self {
    Self {
      entries: Vec::new(),
      by_headword: HashMap::new(),
      enrichment_sources: enrichment_sources.iter().cloned().collect(),
    }
  }

  /// Merge one source's records. Returns (added, updated) entry counts;
  /// the per-source report is observability only, not contract.
  pub fn absorb(&mut self, source_label: &str, records: Vec<LexicalRecord>) -> (usize, usize) {
    let mut added = 0usize;
    let mut updated = 0usize;
    for rec in records {
      if rec.headword.trim().is_empty() {
        continue;
      }
      match self.by_headword.get(&rec.headword).copied() {
        Some(i) => {
          let enrich = self.enrichment_sources.contains(&rec.source_tag);
          merge_into(&mut self.entries[i], rec, enrich);
          updated += 1;
        }
        None => {
          self.by_headword.insert(rec.headword.clone(), self.entries.len());
          self.entries.push(MergedEntry::from_record(rec));
          added += 1;
        }
      }
    }
    info!(target: "lexicon", source = %source_label, added, updated, "merged source");
    (added, updated)
  }

  /// Final merged entry sequence, in insertion order.
  pub fn into_entries(self) -> Vec<MergedEntry> {
    self.entries
  }
}

fn merge_into(e: &mut MergedEntry, rec: LexicalRecord, enrichment: bool) {
  // Level: smallest ordinal survives; the winning claim carries its note.
  match rec.level {
    Some(l) if e.level.map_or(true, |cur| l < cur) => {
      e.level = Some(l);
      if let Some(note) = &rec.level_usage_note {
        e.level_usage_note = note.clone();
      }
      if is_placeholder_gloss(&e.gloss) {
        e.gloss = placeholder_gloss(l);
      }
    }
    _ => {
      if e.level_usage_note.is_empty() {
        if let Some(note) = &rec.level_usage_note {
          e.level_usage_note = note.clone();
        }
      }
    }
  }

  // Pronunciation: fill-only.
  if e.pronunciation.is_empty() && !rec.pronunciation.is_empty() {
    e.pronunciation = rec.pronunciation;
  }

  // Gloss: fill-only; a real gloss replaces a placeholder.
  if !rec.gloss.is_empty() && (e.gloss.is_empty() || (is_placeholder_gloss(&e.gloss) && !is_placeholder_gloss(&rec.gloss))) {
    e.gloss = rec.gloss;
  } else if e.gloss.is_empty() {
    if let Some(l) = e.level {
      e.gloss = placeholder_gloss(l);
    }
  }

  // Priority: very_high always wins; otherwise fill-only.
  if rec.priority_hint == PriorityHint::VeryHigh {
    e.priority_hint = PriorityHint::VeryHigh;
  } else if e.priority_hint == PriorityHint::None {
    e.priority_hint = rec.priority_hint;
  }

  // Auxiliary enrichment fields.
  if enrichment {
    e.frequency_rank = rec.frequency_rank;
    e.parts_of_speech = rec.parts_of_speech;
    e.radical = rec.radical.unwrap_or_default();
    e.traditional_form = rec.traditional_form.unwrap_or_default();
    e.all_glosses = rec.all_glosses;
    e.classifiers = rec.classifiers;
  } else {
    if e.frequency_rank.is_none() {
      e.frequency_rank = rec.frequency_rank;
    }
    if e.parts_of_speech.is_empty() {
      e.parts_of_speech = rec.parts_of_speech;
    }
    if e.radical.is_empty() {
      e.radical = rec.radical.unwrap_or_default();
    }
    if e.traditional_form.is_empty() {
      e.traditional_form = rec.traditional_form.unwrap_or_default();
    }
    if e.all_glosses.is_empty() {
      e.all_glosses = rec.all_glosses;
    }
    if e.classifiers.is_empty() {
      e.classifiers = rec.classifiers;
    }
  }

  // Alternate forms and sources: union, order preserved.
  for alt in rec.alternate_forms {
    if alt != e.headword && !e.alternate_forms.contains(&alt) {
      e.alternate_forms.push(alt);
    }
  }
  if !e.sources.contains(&rec.source_tag) {
    e.sources.push(rec.source_tag);
  }
}
