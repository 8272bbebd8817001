//! Hanlex · Chinese Lexical Aggregation & Sampling Backend
//!
//! - Parses and merges several Chinese lexical sources into one immutable
//!   lexicon at startup (gloss dictionary, structured vocabulary, leveled
//!   tables, frequency lists, built-in seeds)
//! - Serves deterministic level/topic-constrained vocabulary pools over an
//!   Axum HTTP API, plus entry lookup and a bounded lesson store
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   LEXICON_CONFIG_PATH : path to TOML config (source locations, topics)
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod level;
mod config;
mod sources;
mod fetch;
mod merge;
mod index;
mod pinyin;
mod topics;
mod sampler;
mod seeds;
mod store;
mod state;
mod protocol;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Run the aggregation pipeline once; an empty merged set aborts startup.
  let state = Arc::new(AppState::build().await?);

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "hanlex_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(async {
      let _ = tokio::signal::ctrl_c().await;
      info!(target: "hanlex_backend", "shutdown signal received");
    })
    .await?;
  Ok(())
}
