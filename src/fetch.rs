//! Source retrieval: filesystem paths and http(s) URLs behind one call.
//!
//! Retrieval failure is never fatal to the pipeline; callers log the error
//! and let the source contribute zero records.

use std::time::Duration;

use tracing::{info, instrument, warn};

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Read one source body from a path or URL. `Err` means "source
/// unavailable"; the pipeline degrades to skipping it.
#[instrument(level = "info", skip_all, fields(%location))]
pub async fn load_source_text(location: &str) -> Result<String, String> {
  if location.starts_with("http://") || location.starts_with("https://") {
    fetch_url(location).await
  } else {
    match tokio::fs::read_to_string(location).await {
      Ok(body) => {
        info!(target: "lexicon", bytes = body.len(), "read source file");
        Ok(body)
      }
      Err(e) => Err(format!("read {}: {}", location, e)),
    }
  }
}

async fn fetch_url(url: &str) -> Result<String, String> {
  let client = reqwest::Client::builder()
    .timeout(FETCH_TIMEOUT)
    .user_agent("hanlex-backend/0.1")
    .build()
    .map_err(|e| format!("http client: {}", e))?;
  let res = client.get(url).send().await.map_err(|e| format!("fetch {}: {}", url, e))?;
  if !res.status().is_success() {
    return Err(format!("fetch {}: HTTP {}", url, res.status()));
  }
  let body = res.text().await.map_err(|e| format!("fetch {}: {}", url, e))?;
  info!(target: "lexicon", bytes = body.len(), "fetched remote source");
  Ok(body)
}

/// Fetch-or-empty convenience: a `None` location or failed retrieval becomes
/// an empty body (zero records) with a warning.
pub async fn load_optional(location: Option<&String>) -> String {
  let Some(loc) = location else {
    return String::new();
  };
  match load_source_text(loc).await {
    Ok(body) => {
      if body.trim().is_empty() {
        warn!(target: "lexicon", location = %loc, "source is empty; contributing zero records");
      }
      body
    }
    Err(e) => {
      warn!(target: "lexicon", location = %loc, error = %e, "source unavailable; skipping");
      String::new()
    }
  }
}
