//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{AnswerDirection, Choices, QuestionType};
use crate::session::{AnswerFeedback, CurrentQuestion, QuizConfig, SessionSummary};
use crate::study::StudyDeck;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    GetSetup,
    StartQuiz(QuizConfig),
    SubmitAnswer {
        value: String,
    },
    AdvanceQuestion,
    GetCurrentQuestion,
    GetSessionSummary,
    RestartQuiz,
    StudyCurrent,
    StudyNext,
    StudyPrev,
    StudyShuffle,
}

impl ClientWsMessage {
    /// Wire name of the message, safe to log (carries no learner input).
    pub fn name(&self) -> &'static str {
        match self {
            ClientWsMessage::Ping => "ping",
            ClientWsMessage::GetSetup => "get_setup",
            ClientWsMessage::StartQuiz(_) => "start_quiz",
            ClientWsMessage::SubmitAnswer { .. } => "submit_answer",
            ClientWsMessage::AdvanceQuestion => "advance_question",
            ClientWsMessage::GetCurrentQuestion => "get_current_question",
            ClientWsMessage::GetSessionSummary => "get_session_summary",
            ClientWsMessage::RestartQuiz => "restart_quiz",
            ClientWsMessage::StudyCurrent => "study_current",
            ClientWsMessage::StudyNext => "study_next",
            ClientWsMessage::StudyPrev => "study_prev",
            ClientWsMessage::StudyShuffle => "study_shuffle",
        }
    }
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Setup {
        setup: SetupOut,
    },
    Question {
        question: QuestionOut,
    },
    AnswerResult {
        correct: bool,
        expected: String,
        score: usize,
        message: String,
    },
    Summary {
        summary: SummaryOut,
    },
    Card {
        card: CardOut,
    },
    /// Back on the setup screen.
    Reset,
    Error {
        message: String,
    },
}

impl ServerWsMessage {
    pub fn error(e: impl std::fmt::Display) -> Self {
        ServerWsMessage::Error { message: e.to_string() }
    }
}

impl From<AnswerFeedback> for ServerWsMessage {
    fn from(f: AnswerFeedback) -> Self {
        ServerWsMessage::AnswerResult {
            correct: f.correct,
            expected: f.expected,
            score: f.score,
            message: f.message,
        }
    }
}

/// Setup-screen data: whether the deck is usable and the question-count bounds.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupOut {
    pub loaded: bool,
    pub deck_size: usize,
    pub max_questions: usize,
    pub default_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The current question as shown to the learner. Never carries the answer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOut {
    pub index: usize,
    pub total: usize,
    pub score: usize,
    pub progress: String,
    pub score_text: String,
    pub kind: QuestionType,
    pub direction: AnswerDirection,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    pub answered: bool,
}

impl From<CurrentQuestion<'_>> for QuestionOut {
    fn from(q: CurrentQuestion<'_>) -> Self {
        let (options, statement) = match &q.spec.choices {
            Choices::Options { options } => (Some(options.clone()), None),
            Choices::Statement { statement, .. } => (None, Some(statement.clone())),
            Choices::FreeText => (None, None),
        };
        QuestionOut {
            index: q.index,
            total: q.total,
            score: q.score,
            progress: format!("Question {}/{}", q.index + 1, q.total),
            score_text: format!("Score: {}", q.score),
            kind: q.spec.kind,
            direction: q.spec.direction,
            prompt: q.spec.prompt_text.clone(),
            options,
            statement,
            answered: q.answered,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOut {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub percentage_text: String,
    pub tier: &'static str,
    pub message: &'static str,
}

impl From<&SessionSummary> for SummaryOut {
    fn from(s: &SessionSummary) -> Self {
        SummaryOut {
            score: s.score,
            total: s.total,
            percentage: s.percentage,
            percentage_text: format!("{}%", s.percentage),
            tier: s.tier.label(),
            message: s.tier.message(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CardOut {
    pub term: String,
    pub definition: String,
    pub index: usize,
    pub total: usize,
    pub counter: String,
}

impl CardOut {
    pub fn from_deck(deck: &StudyDeck) -> Option<Self> {
        let card = deck.current()?;
        let (index, total) = deck.position();
        Some(CardOut {
            term: card.term.clone(),
            definition: card.definition.clone(),
            index,
            total,
            counter: deck.counter(),
        })
    }
}

//
// HTTP request/response DTOs
//

#[derive(Deserialize)]
pub struct GradeIn {
    pub answer: String,
    pub expected: String,
}
#[derive(Serialize)]
pub struct GradeOut {
    pub correct: bool,
}

#[derive(Serialize)]
pub struct ReloadOut {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
