//! Vocab Trainer · flash cards and quizzes over a term/definition deck
//!
//! - Axum HTTP + WebSocket API (one quiz/study session per WebSocket connection)
//! - Deck loaded once at startup from `words.json` (file path or http(s) URL)
//! - Static files from ./static (words.json and any frontend placed there)
//!
//! Important env variables:
//!   PORT            : u16 (default 3000)
//!   APP_CONFIG_PATH : path to TOML config (vocab source, static dir, quiz defaults)
//!   VOCAB_SOURCE    : overrides the deck location from the config file
//!   LOG_LEVEL       : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod error;
mod config;
mod store;
mod grader;
mod sampler;
mod generator;
mod session;
mod study;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::resolve_app_config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Config, then the initial deck load. A failed load is reported, not fatal.
  let config = resolve_app_config();
  let state = Arc::new(AppState::new(config).await);

  let app = build_router(state.clone());

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "vocab_trainer", %addr, source = %state.source, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
