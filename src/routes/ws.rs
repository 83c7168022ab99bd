//! WebSocket upgrade + message loop. Each connection owns one `LearnerSession`;
//! every client message is parsed as JSON and answered with a single JSON message.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};
use uuid::Uuid;

use crate::logic::{setup_info, LearnerSession, StudyAction};
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(ws, state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "vocab_trainer", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state), fields(conn = %Uuid::new_v4()))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "vocab_trainer", "WebSocket connected");
  let mut learner = LearnerSession::new(state.config.quiz.distractor_count);

  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "vocab_trainer", kind = incoming.name(), "WS received");
            handle_client_ws(incoming, &mut learner, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "vocab_trainer", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "vocab_trainer", "WebSocket disconnected");
}

async fn handle_client_ws(msg: ClientWsMessage, learner: &mut LearnerSession, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,
    ClientWsMessage::GetSetup => ServerWsMessage::Setup { setup: setup_info(state).await },
    ClientWsMessage::StartQuiz(config) => learner.start_quiz(state, config).await,
    ClientWsMessage::SubmitAnswer { value } => learner.submit_answer(&value),
    ClientWsMessage::AdvanceQuestion => learner.advance_question(),
    ClientWsMessage::GetCurrentQuestion => learner.current_question(),
    ClientWsMessage::GetSessionSummary => learner.session_summary(),
    ClientWsMessage::RestartQuiz => learner.restart_quiz(),
    ClientWsMessage::StudyCurrent => learner.study(state, StudyAction::Current).await,
    ClientWsMessage::StudyNext => learner.study(state, StudyAction::Next).await,
    ClientWsMessage::StudyPrev => learner.study(state, StudyAction::Prev).await,
    ClientWsMessage::StudyShuffle => learner.study(state, StudyAction::Shuffle).await,
  }
}
