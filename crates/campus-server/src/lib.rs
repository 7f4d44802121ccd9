//! HTTP server for the campus resource service.
//!
//! Wires the REST API from `campus-api` over any [`DocumentStore`] and wraps
//! it in request tracing. The binary in `main.rs` supplies configuration and a
//! SQLite store.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use campus_core::store::DocumentStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Prefix every API route is mounted under.
pub const API_PREFIX: &str = "/resources";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CAMPUS_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("campus.db") }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       default_host(),
      port:       default_port(),
      store_path: default_store_path(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// `store_path` with a leading `~` expanded to `$HOME`.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The complete application: the API under [`API_PREFIX`] with per-request
/// tracing spans.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: DocumentStore + 'static,
{
  Router::new()
    .nest(API_PREFIX, campus_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use campus_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  #[test]
  fn config_defaults_fill_missing_keys() {
    let cfg: ServerConfig = config::Config::builder()
      .set_override("port", 9000)
      .unwrap()
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.store_path, PathBuf::from("campus.db"));
    assert_eq!(cfg.address(), "127.0.0.1:9000");
  }

  #[test]
  fn tilde_is_expanded_only_at_the_start() {
    let plain = Path::new("data/campus.db");
    assert_eq!(expand_tilde(plain), plain);
    if let Ok(home) = std::env::var("HOME") {
      assert_eq!(
        expand_tilde(Path::new("~/campus.db")),
        PathBuf::from(home).join("campus.db")
      );
    }
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = router(Arc::new(store));

    let req = Request::builder()
      .uri("/resources/notices")
      .body(Body::empty())
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["notices"], serde_json::json!([]));

    let req = Request::builder().uri("/notices").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
