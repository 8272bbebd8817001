//! Public request/response DTOs for the HTTP endpoints (serde ready).
//! Keep this small and stable so backend and callers evolve independently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::LessonRecord;

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
  pub message: String,
}

/// Query for the sampling endpoint. `size` and `seed` drive the optional
/// caller-side seeded shuffle/truncation; the sampler itself stays
/// deterministic.
#[derive(Debug, Deserialize)]
pub struct SampleQuery {
  pub level: Option<String>,
  pub topic: Option<String>,
  pub size: Option<usize>,
  pub seed: Option<u64>,
}

/// The three bounded word lists handed to the generation caller.
#[derive(Serialize)]
pub struct SampleOut {
  pub level: String,
  pub topic: String,
  #[serde(rename = "targetPool")]
  pub target_pool: Vec<String>,
  #[serde(rename = "topicPool")]
  pub topic_pool: Vec<String>,
  #[serde(rename = "allowedPool")]
  pub allowed_pool: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EntryQuery {
  pub word: String,
}

#[derive(Serialize)]
pub struct LevelsOut {
  pub levels: BTreeMap<u8, usize>,
  pub unleveled: usize,
  pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct LessonIn {
  #[serde(rename = "clientId")]
  pub client_id: String,
  pub level: String,
  pub topic: String,
  pub content: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct LessonsQuery {
  #[serde(rename = "clientId")]
  pub client_id: String,
}

#[derive(Serialize)]
pub struct LessonListOut {
  pub lessons: Vec<LessonRecord>,
}
