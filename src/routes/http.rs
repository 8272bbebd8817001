//! HTTP endpoint handlers. These are thin wrappers over the sampler, the
//! lexicon indices, and the lesson store; no lexical logic lives here.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, instrument};

use crate::protocol::*;
use crate::sampler;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state), fields(level = %q.level.clone().unwrap_or_default(), topic = %q.topic.clone().unwrap_or_default()))]
pub async fn http_get_sample(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SampleQuery>,
) -> impl IntoResponse {
  let level = q.level.unwrap_or_else(|| "hsk3".into());
  let topic = q.topic.unwrap_or_default();
  let pools = sampler::sample(&state.lexicon, &state.topics, &level, &topic);

  let mut target_pool = sampler::headwords(&pools.target);
  let mut topic_pool = sampler::headwords(&pools.topic);
  let mut allowed_pool = sampler::headwords(&pools.allowed);

  // Presentation variety is the caller's concern: the seeded shuffle and the
  // further truncation happen here, outside the deterministic sampler.
  if let Some(seed) = q.seed {
    let mut rng = StdRng::seed_from_u64(seed);
    target_pool.shuffle(&mut rng);
    topic_pool.shuffle(&mut rng);
    allowed_pool.shuffle(&mut rng);
  }
  if let Some(size) = q.size {
    target_pool.truncate(size);
    topic_pool.truncate(size);
    allowed_pool.truncate(size);
  }

  info!(
    target: "sampler",
    %level,
    %topic,
    target = target_pool.len(),
    topical = topic_pool.len(),
    allowed = allowed_pool.len(),
    "HTTP sample served"
  );
  Json(SampleOut { level, topic, target_pool, topic_pool, allowed_pool })
}

#[instrument(level = "info", skip(state), fields(word = %q.word))]
pub async fn http_get_entry(
  State(state): State<Arc<AppState>>,
  Query(q): Query<EntryQuery>,
) -> Response {
  match state.lexicon.lookup(&q.word) {
    Some(entry) => Json(entry.clone()).into_response(),
    None => (
      StatusCode::NOT_FOUND,
      Json(ErrorOut { message: format!("unknown word: {}", q.word) }),
    )
      .into_response(),
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_levels(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(LevelsOut {
    levels: state.lexicon.level_counts(),
    unleveled: state.lexicon.unleveled().len(),
    total: state.lexicon.len(),
  })
}

#[instrument(level = "info", skip(state, body), fields(%body.client_id, %body.level, %body.topic))]
pub async fn http_post_lesson(
  State(state): State<Arc<AppState>>,
  Json(body): Json<LessonIn>,
) -> impl IntoResponse {
  let rec = state
    .lessons
    .insert(&body.client_id, &body.level, &body.topic, body.content)
    .await;
  info!(target: "hanlex_backend", id = %rec.id, "lesson stored");
  Json(rec)
}

#[instrument(level = "info", skip(state), fields(%q.client_id))]
pub async fn http_get_lessons(
  State(state): State<Arc<AppState>>,
  Query(q): Query<LessonsQuery>,
) -> impl IntoResponse {
  let lessons = state.lessons.list(&q.client_id).await;
  Json(LessonListOut { lessons })
}
