//! Application state: the built lexicon, topic table, and lesson store.
//!
//! `AppState::build` runs the whole aggregation pipeline once at startup:
//! retrieve source bodies (concurrently), parse them, merge in the fixed
//! source order, enrich pronunciations, index. The resulting `Lexicon` is
//! immutable and shared read-only with every sampler call.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{instrument, warn};

use crate::config::{load_lexicon_config_from_env, LexiconConfig};
use crate::domain::{SRC_GLOSS_DICT, SRC_SEED, SRC_STRUCTURED};
use crate::fetch;
use crate::index::Lexicon;
use crate::merge::MergeEngine;
use crate::seeds::seed_records;
use crate::sources::{frequency, gloss_dict, level_table, structured};
use crate::store::LessonStore;
use crate::topics::TopicTable;

#[derive(Clone)]
pub struct AppState {
  pub lexicon: Arc<Lexicon>,
  pub topics: TopicTable,
  pub lessons: LessonStore,
}

impl AppState {
  /// Build state from env: load TOML config (or defaults) and run the
  /// pipeline. A fatal error here (empty merged set) aborts startup.
  #[instrument(level = "info", skip_all)]
  pub async fn build() -> Result<Self, String> {
    let cfg = load_lexicon_config_from_env().unwrap_or_default();
    Self::build_with(cfg).await
  }

  pub async fn build_with(cfg: LexiconConfig) -> Result<Self, String> {
    // Retrieval of independent sources runs concurrently; the merge below
    // still consumes them in the fixed documented order so precedence stays
    // deterministic.
    let gloss_task = spawn_fetch(cfg.sources.gloss_dict.clone());
    let structured_task = spawn_fetch(cfg.sources.structured.clone());
    let table_tasks: Vec<JoinHandle<String>> = cfg
      .sources
      .level_tables
      .iter()
      .cloned()
      .map(|loc| spawn_fetch(Some(loc)))
      .collect();
    let freq_tasks: Vec<(u32, JoinHandle<String>)> = cfg
      .sources
      .frequency
      .iter()
      .map(|f| (f.band, spawn_fetch(Some(f.location.clone()))))
      .collect();

    let gloss_body = join_body(gloss_task).await;
    let structured_body = join_body(structured_task).await;
    let mut table_bodies = Vec::with_capacity(table_tasks.len());
    for t in table_tasks {
      table_bodies.push(join_body(t).await);
    }
    let mut freq_bodies = Vec::with_capacity(freq_tasks.len());
    for (band, t) in freq_tasks {
      freq_bodies.push((band, join_body(t).await));
    }

    // Fixed merge order: gloss dict → structured → leveled tables →
    // frequency lists → seeds (see sources::mod).
    let mut engine = MergeEngine::new(&cfg.merge.enrichment_sources);
    engine.absorb(SRC_GLOSS_DICT, gloss_dict::parse(&gloss_body));
    engine.absorb(SRC_STRUCTURED, structured::parse(&structured_body));
    for (i, body) in table_bodies.iter().enumerate() {
      engine.absorb(&format!("level_table[{}]", i), level_table::parse(body));
    }
    for (band, body) in &freq_bodies {
      engine.absorb(&frequency::band_tag(*band), frequency::parse(body, *band));
    }
    engine.absorb(SRC_SEED, seed_records());

    let mut entries = engine.into_entries();
    crate::pinyin::enrich_pronunciations(&mut entries);
    let lexicon = Lexicon::build(entries)?;

    Ok(Self {
      lexicon: Arc::new(lexicon),
      topics: TopicTable::builtin().with_overrides(&cfg.topics.keywords),
      lessons: LessonStore::new(cfg.lessons.retain_per_client),
    })
  }
}

fn spawn_fetch(location: Option<String>) -> JoinHandle<String> {
  tokio::spawn(async move { fetch::load_optional(location.as_ref()).await })
}

async fn join_body(task: JoinHandle<String>) -> String {
  match task.await {
    Ok(body) => body,
    Err(e) => {
      warn!(target: "lexicon", error = %e, "source retrieval task failed; skipping");
      String::new()
    }
  }
}
