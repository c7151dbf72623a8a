//! HTTP server for Academia.
//!
//! Mounts the JSON API from [`academia_api`] under `/api`, serves stored
//! photos under `/photos`, and wraps everything in request tracing.

pub mod error;
pub mod photos;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use academia_api::AppState;
use academia_core::store::GymStore;
use axum::{
  Router,
  extract::{Path, State},
  http::header,
  response::IntoResponse,
  routing::get,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use photos::DiskPhotoStore;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ACADEMIA_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
  /// Directory uploaded photos are written to.
  pub photo_dir:     PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "127.0.0.1".to_string(),
      port:          8080,
      database_path: PathBuf::from("academia.db"),
      photo_dir:     PathBuf::from("photos"),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete axum [`Router`] for the server.
pub fn router<S>(store: Arc<S>, photos: Arc<DiskPhotoStore>) -> Router
where
  S: GymStore + 'static,
{
  let api = academia_api::api_router(AppState::new(store, photos.clone()));

  Router::new()
    .route("/photos/{name}", get(photo_handler))
    .with_state(photos)
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

/// `GET /photos/:name`
async fn photo_handler(
  State(photos): State<Arc<DiskPhotoStore>>,
  Path(name): Path<String>,
) -> Result<impl IntoResponse, Error> {
  let data = photos.read(&name).await?;
  Ok(([(header::CONTENT_TYPE, content_type(&name))], data))
}

fn content_type(name: &str) -> &'static str {
  let ext = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
  match ext {
    "png" => "image/png",
    "jpg" | "jpeg" => "image/jpeg",
    "gif" => "image/gif",
    "webp" => "image/webp",
    _ => "application/octet-stream",
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
