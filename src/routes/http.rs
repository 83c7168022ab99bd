//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.

use std::sync::Arc;
use axum::{extract::State, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::logic::{do_grade, setup_info};
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_vocab(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(setup_info(&state).await)
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_reload(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let out = match state.reload().await {
    Ok(items) => ReloadOut { ok: true, items: Some(items), error: None },
    Err(e) => ReloadOut { ok: false, items: None, error: Some(e.to_string()) },
  };
  info!(target: "vocab_trainer", ok = out.ok, "HTTP vocabulary reload");
  Json(out)
}

#[instrument(level = "info", skip(body), fields(answer_len = body.answer.len()))]
pub async fn http_post_grade(Json(body): Json<GradeIn>) -> impl IntoResponse {
  let correct = do_grade(&body.answer, &body.expected);
  Json(GradeOut { correct })
}
