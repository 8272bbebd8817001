//! In-memory lesson record store with per-client capacity-bounded eviction.
//!
//! Generated lessons are bookkeeping, not lexicon data: keyed by a generated
//! id, holding `{level, topic, content, createdAt}`. Each client retains only
//! its N most-recently-created records; the oldest beyond that bound are
//! evicted on insert.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize)]
pub struct LessonRecord {
  pub id: String,
  #[serde(rename = "clientId")]
  pub client_id: String,
  pub level: String,
  pub topic: String,
  pub content: serde_json::Value,
  #[serde(rename = "createdAt")]
  pub created_at: u64,
}

#[derive(Clone)]
pub struct LessonStore {
  by_client: Arc<RwLock<HashMap<String, Vec<LessonRecord>>>>,
  retain_per_client: usize,
}

impl LessonStore {
  pub fn new(retain_per_client: usize) -> Self {
    Self {
      by_client: Arc::new(RwLock::new(HashMap::new())),
      retain_per_client: retain_per_client.max(1),
    }
  }

  /// Insert a lesson record, evicting this client's oldest entries beyond
  /// the retention bound. Returns the stored record.
  #[instrument(level = "debug", skip(self, content), fields(%client_id, %level, %topic))]
  pub async fn insert(
    &self,
    client_id: &str,
    level: &str,
    topic: &str,
    content: serde_json::Value,
  ) -> LessonRecord {
    let rec = LessonRecord {
      id: Uuid::new_v4().to_string(),
      client_id: client_id.to_string(),
      level: level.to_string(),
      topic: topic.to_string(),
      content,
      created_at: unix_now(),
    };
    let mut by_client = self.by_client.write().await;
    let list = by_client.entry(client_id.to_string()).or_default();
    list.push(rec.clone());
    if list.len() > self.retain_per_client {
      let excess = list.len() - self.retain_per_client;
      list.drain(..excess);
      debug!(target: "hanlex_backend", %client_id, evicted = excess, "lesson store eviction");
    }
    rec
  }

  /// This client's retained records, most recent last.
  pub async fn list(&self, client_id: &str) -> Vec<LessonRecord> {
    self.by_client.read().await.get(client_id).cloned().unwrap_or_default()
  }

  #[allow(dead_code)]
  pub async fn get(&self, id: &str) -> Option<LessonRecord> {
    let by_client = self.by_client.read().await;
    by_client.values().flatten().find(|r| r.id == id).cloned()
  }
}

fn unix_now() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_secs())
    .unwrap_or(0)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn retains_only_most_recent_per_client() {
    let store = LessonStore::new(3);
    for n in 0..5 {
      store
        .insert("c1", "hsk3", "food", serde_json::json!({ "n": n }))
        .await;
    }
    store.insert("c2", "hsk1", "travel", serde_json::json!({})).await;

    let kept = store.list("c1").await;
    assert_eq!(kept.len(), 3);
    assert_eq!(kept[0].content["n"], 2);
    assert_eq!(kept[2].content["n"], 4);
    assert_eq!(store.list("c2").await.len(), 1);
  }

  #[tokio::test]
  async fn lookup_by_id() {
    let store = LessonStore::new(3);
    let rec = store.insert("c1", "hsk2", "family", serde_json::json!({})).await;
    assert!(store.get(&rec.id).await.is_some());
    assert!(store.get("missing").await.is_none());
  }
}
