//! Level-constrained topic sampling over the built lexicon.
//!
//! `sample(level, topic)` returns three ordered, bounded, de-duplicated
//! pools:
//!   - target: every entry at exactly the requested level, elevated-priority
//!     subset moved to the front (stable partition), widened by the fallback
//!     cascade when the level is too thin
//!   - topic: the topic-relevant subset of target, in target order
//!   - allowed: the broad pool for non-vocabulary content, with bounded
//!     lower-level admixture and a hard cap
//!
//! Everything here is deterministic for fixed input data and fixed
//! level/topic. Randomized sub-selection for presentation variety is the
//! caller's job, in a seedable step outside this module (see routes::http).

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::MergedEntry;
use crate::index::Lexicon;
use crate::level::parse_level_label;
use crate::topics::TopicTable;

/// Hard cap on the broad allowed pool.
pub const ALLOWED_POOL_CAP: usize = 500;
/// Cascade trigger: target thinner than this pulls from one level below.
const CASCADE_MIN_TARGET: usize = 20;
/// Second cascade trigger: still thinner than this pulls unleveled entries.
const CASCADE_MIN_AFTER_LOWER: usize = 10;
/// Per-step cap on cascade appends.
const CASCADE_APPEND_CAP: usize = 100;
/// Lower-level admixture caps for the allowed pool.
const LOWER_CAP_UPPER_LEVELS: usize = 100;
const LOWER_CAP_AT_OR_BELOW_TWO: usize = 200;
/// Unleveled entries top the allowed pool up to this floor.
const ALLOWED_UNLEVELED_FLOOR: usize = 100;
/// Safe-default pool sizes for an unrecognized level label.
const DEFAULT_TARGET_CAP: usize = 200;

pub struct SamplePools<'a> {
  pub target: Vec<&'a MergedEntry>,
  pub topic: Vec<&'a MergedEntry>,
  pub allowed: Vec<&'a MergedEntry>,
}

/// Headword projection of one pool, the shape handed to external callers.
pub fn headwords(pool: &[&MergedEntry]) -> Vec<String> {
  pool.iter().map(|e| e.headword.clone()).collect()
}

#[instrument(level = "debug", skip(lexicon, topics), fields(%level_label, %topic_label))]
pub fn sample<'a>(
  lexicon: &'a Lexicon,
  topics: &TopicTable,
  level_label: &str,
  topic_label: &str,
) -> SamplePools<'a> {
  let Some(level) = parse_level_label(level_label) else {
    return default_pools(lexicon, topics, topic_label);
  };

  // Stable partition of the exact-level bucket: elevated priority first,
  // relative order otherwise preserved.
  let bucket = lexicon.at_level(level);
  let mut front: Vec<usize> = Vec::new();
  let mut back: Vec<usize> = Vec::new();
  for &i in bucket {
    if lexicon.entry(i).priority_hint.is_elevated() {
      front.push(i);
    } else {
      back.push(i);
    }
  }

  let mut seen: HashSet<&str> = HashSet::new();
  let mut target: Vec<usize> = Vec::new();
  for &i in front.iter().chain(back.iter()) {
    push_unique(lexicon, &mut target, &mut seen, i, usize::MAX);
  }

  // Fallback cascade: appends only, never removes or reorders.
  if target.len() < CASCADE_MIN_TARGET && level > 1 {
    let cap = target.len() + CASCADE_APPEND_CAP;
    for &i in lexicon.at_level(level - 1) {
      push_unique(lexicon, &mut target, &mut seen, i, cap);
    }
  }
  if target.len() < CASCADE_MIN_AFTER_LOWER {
    let cap = target.len() + CASCADE_APPEND_CAP;
    for &i in lexicon.unleveled() {
      push_unique(lexicon, &mut target, &mut seen, i, cap);
    }
  }

  let topic_pool: Vec<usize> = target
    .iter()
    .copied()
    .filter(|&i| topics.matches(topic_label, lexicon.entry(i)))
    .collect();

  // Broad allowed pool: priority target entries, remaining target entries,
  // bounded lower-level admixture (closest level first), then unleveled
  // entries up to the floor. Hard-capped at the end.
  let mut allowed_seen: HashSet<&str> = HashSet::new();
  let mut allowed: Vec<usize> = Vec::new();
  for &i in front.iter().chain(back.iter()) {
    push_unique(lexicon, &mut allowed, &mut allowed_seen, i, ALLOWED_POOL_CAP);
  }
  let lower_cap = if level <= 2 { LOWER_CAP_AT_OR_BELOW_TWO } else { LOWER_CAP_UPPER_LEVELS };
  let mut lower_taken = 0usize;
  'lower: for ll in (1..level).rev() {
    for &i in lexicon.at_level(ll) {
      if lower_taken >= lower_cap || allowed.len() >= ALLOWED_POOL_CAP {
        break 'lower;
      }
      if push_unique(lexicon, &mut allowed, &mut allowed_seen, i, ALLOWED_POOL_CAP) {
        lower_taken += 1;
      }
    }
  }
  if allowed.len() < ALLOWED_UNLEVELED_FLOOR {
    for &i in lexicon.unleveled() {
      if allowed.len() >= ALLOWED_UNLEVELED_FLOOR {
        break;
      }
      push_unique(lexicon, &mut allowed, &mut allowed_seen, i, ALLOWED_UNLEVELED_FLOOR);
    }
  }
  allowed.truncate(ALLOWED_POOL_CAP);

  debug!(
    target: "sampler",
    level,
    target_len = target.len(),
    topic_len = topic_pool.len(),
    allowed_len = allowed.len(),
    "sampled pools"
  );

  SamplePools {
    target: resolve(lexicon, &target),
    topic: resolve(lexicon, &topic_pool),
    allowed: resolve(lexicon, &allowed),
  }
}

/// Unrecognized level labels degrade to leading slices of the whole merged
/// set, never an empty result.
fn default_pools<'a>(lexicon: &'a Lexicon, topics: &TopicTable, topic_label: &str) -> SamplePools<'a> {
  let target: Vec<&MergedEntry> = lexicon.entries().iter().take(DEFAULT_TARGET_CAP).collect();
  let allowed: Vec<&MergedEntry> = lexicon.entries().iter().take(ALLOWED_POOL_CAP).collect();
  let topic: Vec<&MergedEntry> = target
    .iter()
    .copied()
    .filter(|e| topics.matches(topic_label, e))
    .collect();
  SamplePools { target, topic, allowed }
}

/// Append entry `i` unless its headword is already pooled or the pool is at
/// `cap`. Returns whether the entry was appended.
fn push_unique<'a>(
  lexicon: &'a Lexicon,
  pool: &mut Vec<usize>,
  seen: &mut HashSet<&'a str>,
  i: usize,
  cap: usize,
) -> bool {
  if pool.len() >= cap {
    return false;
  }
  if seen.insert(lexicon.entry(i).headword.as_str()) {
    pool.push(i);
    true
  } else {
    false
  }
}

fn resolve<'a>(lexicon: &'a Lexicon, pool: &[usize]) -> Vec<&'a MergedEntry> {
  pool.iter().map(|&i| lexicon.entry(i)).collect()
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;
  use crate::domain::{LexicalRecord, MergedEntry, PriorityHint, SRC_GLOSS_DICT};
  use crate::index::Lexicon;

  fn entry(head: &str, level: Option<u8>, priority: PriorityHint, gloss: &str) -> MergedEntry {
    let mut r = LexicalRecord::new(head, SRC_GLOSS_DICT);
    r.level = level;
    r.priority_hint = priority;
    r.gloss = gloss.to_string();
    MergedEntry::from_record(r)
  }

  fn plain(head: &str, level: Option<u8>) -> MergedEntry {
    entry(head, level, PriorityHint::None, "gloss")
  }

  fn topics_with(label: &str, keywords: Vec<String>) -> TopicTable {
    let mut overrides = HashMap::new();
    overrides.insert(label.to_string(), keywords);
    TopicTable::builtin().with_overrides(&overrides)
  }

  /// 150 entries at level 4; every 5th (30 total) is very_high; 12 of the
  /// non-elevated ones carry a business keyword in the headword set.
  fn business_fixture() -> (Lexicon, TopicTable, Vec<String>) {
    let mut entries = Vec::new();
    let mut matched = Vec::new();
    for n in 0..150 {
      let head = format!("w{:03}", n);
      let pri = if n % 5 == 0 { PriorityHint::VeryHigh } else { PriorityHint::None };
      entries.push(entry(&head, Some(4), pri, "plain"));
      if n % 5 == 1 && matched.len() < 12 {
        matched.push(head);
      }
    }
    let topics = topics_with("business", matched.clone());
    (Lexicon::build(entries).unwrap(), topics, matched)
  }

  #[test]
  fn target_partitions_priority_front_order_preserved() {
    let (lex, topics, _) = business_fixture();
    let pools = sample(&lex, &topics, "hsk4", "Business");
    assert_eq!(pools.target.len(), 150);
    let front: Vec<&str> = pools.target[..30].iter().map(|e| e.headword.as_str()).collect();
    let expected: Vec<String> = (0..150).step_by(5).map(|n| format!("w{:03}", n)).collect();
    assert_eq!(front, expected.iter().map(String::as_str).collect::<Vec<_>>());
    // Non-elevated tail keeps its own relative order too.
    assert_eq!(pools.target[30].headword, "w001");
    assert_eq!(pools.target[149].headword, "w149");
  }

  #[test]
  fn topic_pool_is_exact_matches_in_target_order() {
    let (lex, topics, matched) = business_fixture();
    let pools = sample(&lex, &topics, "hsk4", "Business");
    let got: Vec<&str> = pools.topic.iter().map(|e| e.headword.as_str()).collect();
    assert_eq!(got, matched.iter().map(String::as_str).collect::<Vec<_>>());
    // Subset property: every topic entry appears in target.
    let target: Vec<&str> = pools.target.iter().map(|e| e.headword.as_str()).collect();
    assert!(got.iter().all(|h| target.contains(h)));
  }

  #[test]
  fn empty_level_falls_back_to_level_below() {
    let entries: Vec<MergedEntry> = (0..40).map(|n| plain(&format!("l2w{}", n), Some(2))).collect();
    let lex = Lexicon::build(entries).unwrap();
    let pools = sample(&lex, &TopicTable::builtin(), "hsk3", "food");
    assert_eq!(pools.target.len(), 40);
    assert_eq!(pools.target[0].headword, "l2w0");
  }

  #[test]
  fn thin_level_cascade_appends_without_reordering() {
    let mut entries: Vec<MergedEntry> = (0..5).map(|n| plain(&format!("t{}", n), Some(3))).collect();
    entries.extend((0..3).map(|n| plain(&format!("lo{}", n), Some(2))));
    entries.extend((0..4).map(|n| plain(&format!("u{}", n), None)));
    let lex = Lexicon::build(entries).unwrap();
    let pools = sample(&lex, &TopicTable::builtin(), "hsk3", "food");
    // 5 native + 3 from level 2, still < 10, + 4 unleveled.
    let got: Vec<&str> = pools.target.iter().map(|e| e.headword.as_str()).collect();
    assert_eq!(got, vec!["t0", "t1", "t2", "t3", "t4", "lo0", "lo1", "lo2", "u0", "u1", "u2", "u3"]);
  }

  #[test]
  fn cascade_does_not_trigger_at_twenty_or_more() {
    let mut entries: Vec<MergedEntry> = (0..20).map(|n| plain(&format!("t{}", n), Some(3))).collect();
    entries.extend((0..30).map(|n| plain(&format!("lo{}", n), Some(2))));
    let lex = Lexicon::build(entries).unwrap();
    let pools = sample(&lex, &TopicTable::builtin(), "hsk3", "food");
    assert_eq!(pools.target.len(), 20);
  }

  #[test]
  fn allowed_pool_is_hard_capped() {
    let mut entries: Vec<MergedEntry> = (0..400).map(|n| plain(&format!("a{}", n), Some(2))).collect();
    entries.extend((0..300).map(|n| plain(&format!("b{}", n), Some(1))));
    let lex = Lexicon::build(entries).unwrap();
    let pools = sample(&lex, &TopicTable::builtin(), "hsk2", "food");
    assert!(pools.allowed.len() <= ALLOWED_POOL_CAP);
    assert_eq!(pools.allowed.len(), ALLOWED_POOL_CAP);
    // 400 target entries leave room for only 100 of the (up to 200)
    // lower-level admixture before the hard cap.
    let lower = pools.allowed.iter().filter(|e| e.level == Some(1)).count();
    assert_eq!(lower, 100);
  }

  #[test]
  fn allowed_pool_composition_and_unleveled_floor() {
    let mut entries = Vec::new();
    entries.push(entry("p1", Some(3), PriorityHint::VeryHigh, "g"));
    entries.push(entry("n1", Some(3), PriorityHint::None, "g"));
    entries.push(entry("p2", Some(3), PriorityHint::High, "g"));
    entries.extend((0..30).map(|n| plain(&format!("l2_{}", n), Some(2))));
    entries.extend((0..30).map(|n| plain(&format!("l1_{}", n), Some(1))));
    entries.extend((0..200).map(|n| plain(&format!("u{}", n), None)));
    let lex = Lexicon::build(entries).unwrap();
    let pools = sample(&lex, &TopicTable::builtin(), "hsk3", "food");
    let got: Vec<&str> = pools.allowed.iter().map(|e| e.headword.as_str()).collect();
    // Elevated first, then remaining target, then level 2 before level 1.
    assert_eq!(&got[..3], &["p1", "p2", "n1"]);
    assert_eq!(got[3], "l2_0");
    assert_eq!(got[33], "l1_0");
    // 3 + 60 = 63 leveled, topped up with unleveled to the floor of 100.
    assert_eq!(pools.allowed.len(), 100);
    assert_eq!(got[63], "u0");
  }

  #[test]
  fn unrecognized_level_yields_leading_slices_never_empty() {
    let entries: Vec<MergedEntry> = (0..600).map(|n| plain(&format!("w{}", n), Some(1))).collect();
    let lex = Lexicon::build(entries).unwrap();
    let pools = sample(&lex, &TopicTable::builtin(), "beginner", "food");
    assert_eq!(pools.target.len(), 200);
    assert_eq!(pools.allowed.len(), 500);
    assert_eq!(pools.target[0].headword, "w0");
  }

  #[test]
  fn pools_are_deterministic() {
    let (lex, topics, _) = business_fixture();
    let a = sample(&lex, &topics, "hsk4", "Business");
    let b = sample(&lex, &topics, "hsk4", "Business");
    assert_eq!(headwords(&a.target), headwords(&b.target));
    assert_eq!(headwords(&a.topic), headwords(&b.topic));
    assert_eq!(headwords(&a.allowed), headwords(&b.allowed));
  }
}
