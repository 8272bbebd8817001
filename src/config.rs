//! Loading the lexicon configuration (source locations, topic keyword
//! overrides, merge tuning) from TOML.
//!
//! Every field is defaulted so the binary runs with zero configuration (the
//! built-in seed lexicon alone). Expected schema:
//!
//! ```toml
//! [sources]
//! gloss_dict = "data/cedict.txt"            # path or http(s) URL
//! structured = "https://example.org/vocab.json"
//! level_tables = ["data/hsk_words.csv"]
//!
//! [[sources.frequency]]
//! location = "data/top1000.tsv"
//! band = 1000
//!
//! [merge]
//! enrichment_sources = ["structured"]
//!
//! [topics.keywords]
//! sports = ["足球", "ball"]
//!
//! [lessons]
//! retain_per_client = 20
//! ```

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::SRC_STRUCTURED;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct LexiconConfig {
  #[serde(default)]
  pub sources: SourcesCfg,
  #[serde(default)]
  pub merge: MergeCfg,
  #[serde(default)]
  pub topics: TopicsCfg,
  #[serde(default)]
  pub lessons: LessonsCfg,
}

/// Where to read each source from. A location is a filesystem path or an
/// http(s) URL; missing/unfetchable locations degrade to zero records.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct SourcesCfg {
  #[serde(default)]
  pub gloss_dict: Option<String>,
  #[serde(default)]
  pub structured: Option<String>,
  #[serde(default)]
  pub level_tables: Vec<String>,
  #[serde(default)]
  pub frequency: Vec<FrequencyCfg>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FrequencyCfg {
  pub location: String,
  pub band: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MergeCfg {
  /// Tags whose auxiliary fields overwrite wholesale at merge time. When two
  /// are listed, the one processed last wins.
  #[serde(default = "default_enrichment_sources")]
  pub enrichment_sources: Vec<String>,
}
impl Default for MergeCfg {
  fn default() -> Self {
    Self { enrichment_sources: default_enrichment_sources() }
  }
}
fn default_enrichment_sources() -> Vec<String> {
  vec![SRC_STRUCTURED.to_string()]
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct TopicsCfg {
  /// Per-label keyword sets merged over the built-in topic table.
  #[serde(default)]
  pub keywords: HashMap<String, Vec<String>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LessonsCfg {
  #[serde(default = "default_retain_per_client")]
  pub retain_per_client: usize,
}
impl Default for LessonsCfg {
  fn default() -> Self {
    Self { retain_per_client: default_retain_per_client() }
  }
}
fn default_retain_per_client() -> usize {
  20
}

/// Attempt to load `LexiconConfig` from LEXICON_CONFIG_PATH. On any
/// parsing/IO error, returns None and the defaults apply.
pub fn load_lexicon_config_from_env() -> Option<LexiconConfig> {
  let path = std::env::var("LEXICON_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<LexiconConfig>(&s) {
      Ok(cfg) => {
        info!(target: "hanlex_backend", %path, "Loaded lexicon config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "hanlex_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "hanlex_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_apply_to_empty_config() {
    let cfg: LexiconConfig = toml::from_str("").unwrap();
    assert!(cfg.sources.gloss_dict.is_none());
    assert_eq!(cfg.merge.enrichment_sources, vec![SRC_STRUCTURED.to_string()]);
    assert_eq!(cfg.lessons.retain_per_client, 20);
    assert!(cfg.topics.keywords.is_empty());
  }

  #[test]
  fn full_config_parses() {
    let cfg: LexiconConfig = toml::from_str(
      r#"
      [sources]
      gloss_dict = "data/cedict.txt"
      level_tables = ["data/hsk.csv", "data/extra.csv"]

      [[sources.frequency]]
      location = "data/top1000.tsv"
      band = 1000

      [merge]
      enrichment_sources = ["structured", "freq_top1000"]

      [topics.keywords]
      sports = ["足球"]

      [lessons]
      retain_per_client = 5
      "#,
    )
    .unwrap();
    assert_eq!(cfg.sources.level_tables.len(), 2);
    assert_eq!(cfg.sources.frequency[0].band, 1000);
    assert_eq!(cfg.merge.enrichment_sources.len(), 2);
    assert_eq!(cfg.topics.keywords["sports"], vec!["足球"]);
    assert_eq!(cfg.lessons.retain_per_client, 5);
  }
}
