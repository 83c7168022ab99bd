//! Quiz session controller: `Setup -> Active -> Finished`.
//!
//! One controller per learner connection. It owns the running `QuizSession`;
//! nothing else reads or writes it.

use std::collections::BTreeSet;

use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{DirectionPolicy, QuestionSpec, QuestionType};
use crate::error::{ConfigValidationError, SessionError};
use crate::generator::generate;
use crate::grader::grade;
use crate::store::VocabStore;

/// Settings collected on the setup screen.
///
/// `count` is signed and `types` may be omitted; `validate` rejects both.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct QuizConfig {
    pub count: i64,
    #[serde(default, rename = "answerWith", alias = "direction")]
    pub direction: DirectionPolicy,
    #[serde(default)]
    pub types: BTreeSet<QuestionType>,
}

impl QuizConfig {
    /// Check the settings against `store`; returns the accepted question count.
    pub fn validate(&self, store: &VocabStore) -> Result<usize, ConfigValidationError> {
        if self.types.is_empty() {
            return Err(ConfigValidationError::NoQuestionTypes);
        }
        if store.is_empty() {
            return Err(ConfigValidationError::NoVocabulary);
        }
        match usize::try_from(self.count) {
            Ok(count) if (1..=store.len()).contains(&count) => Ok(count),
            _ => Err(ConfigValidationError::CountOutOfRange {
                requested: self.count,
                max: store.len(),
            }),
        }
    }
}

/// Questions plus progress for one quiz run.
#[derive(Clone, Debug)]
pub struct QuizSession {
    pub id: Uuid,
    questions: Vec<QuestionSpec>,
    current_index: usize,
    score: usize,
    answered: Vec<bool>,
}

impl QuizSession {
    fn new(questions: Vec<QuestionSpec>) -> Self {
        let answered = vec![false; questions.len()];
        Self { id: Uuid::new_v4(), questions, current_index: 0, score: 0, answered }
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Perfect,
    Good,
    NeedsPractice,
}

impl Tier {
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 100 {
            Tier::Perfect
        } else if percentage >= 70 {
            Tier::Good
        } else {
            Tier::NeedsPractice
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Perfect => "perfect",
            Tier::Good => "good",
            Tier::NeedsPractice => "needs practice",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Tier::Perfect => "Perfect score! You're a master.",
            Tier::Good => "Great job! Keep practicing.",
            Tier::NeedsPractice => "Keep studying, you'll get there!",
        }
    }
}

/// Final result of a finished quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub tier: Tier,
}

impl SessionSummary {
    /// `percentage = round(score / total * 100)`.
    pub fn new(score: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            ((score as f64 / total as f64) * 100.0).round() as u32
        };
        Self { score, total, percentage, tier: Tier::from_percentage(percentage) }
    }
}

/// Result of grading one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub expected: String,
    pub score: usize,
    pub message: String,
}

/// Borrowed view of the question the learner is on.
#[derive(Clone, Copy, Debug)]
pub struct CurrentQuestion<'a> {
    pub index: usize,
    pub total: usize,
    pub score: usize,
    pub answered: bool,
    pub spec: &'a QuestionSpec,
}

#[derive(Clone, Debug)]
pub enum Phase {
    Setup,
    Active(QuizSession),
    Finished(SessionSummary),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Active(_) => "active",
            Phase::Finished(_) => "finished",
        }
    }
}

#[derive(Clone, Debug)]
pub struct QuizController {
    phase: Phase,
    distractor_count: usize,
}

impl QuizController {
    pub fn new(distractor_count: usize) -> Self {
        Self { phase: Phase::Setup, distractor_count }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Validate `config` and build a fresh session from `store`.
    /// On a validation error the controller is left untouched.
    #[instrument(level = "info", skip(self, store, rng), fields(pool_len = store.len()))]
    pub fn start_quiz<R: Rng + ?Sized>(
        &mut self,
        store: &VocabStore,
        config: &QuizConfig,
        rng: &mut R,
    ) -> Result<Uuid, ConfigValidationError> {
        let count = match config.validate(store) {
            Ok(count) => count,
            Err(e) => {
                warn!(target: "quiz", error = %e, phase = self.phase.name(), "Rejected quiz settings");
                return Err(e);
            }
        };
        let questions = generate(
            store.items(),
            count,
            &config.types,
            config.direction,
            self.distractor_count,
            rng,
        )?;
        let session = QuizSession::new(questions);
        let id = session.id;
        info!(target: "quiz", session = %id, total = session.total(), "Quiz started");
        self.phase = Phase::Active(session);
        Ok(id)
    }

    /// Grade `value` against the current question. Only the first submission counts.
    #[instrument(level = "info", skip(self, value), fields(answer_len = value.len()))]
    pub fn submit_answer(&mut self, value: &str) -> Result<AnswerFeedback, SessionError> {
        let Phase::Active(session) = &mut self.phase else {
            return Err(SessionError::NotActive);
        };
        let index = session.current_index;
        if session.answered[index] {
            debug!(target: "quiz", session = %session.id, index, "Duplicate submission ignored");
            return Err(SessionError::AlreadyAnswered(index));
        }

        let expected = session.questions[index].answer_key().to_string();
        let correct = grade(value, &expected);
        session.answered[index] = true;
        if correct {
            session.score += 1;
        }
        info!(target: "quiz", session = %session.id, index, %correct, score = session.score, "Answer graded");

        let message = if correct {
            "Correct!".to_string()
        } else {
            format!("Incorrect. Correct answer: {expected}")
        };
        Ok(AnswerFeedback { correct, expected, score: session.score, message })
    }

    /// Move past an answered question; finishing the last one ends the quiz.
    #[instrument(level = "debug", skip(self))]
    pub fn advance(&mut self) -> Result<(), SessionError> {
        let Phase::Active(session) = &mut self.phase else {
            return Err(SessionError::NotActive);
        };
        let index = session.current_index;
        if !session.answered[index] {
            return Err(SessionError::NotAnswered(index));
        }
        session.current_index += 1;
        if session.current_index == session.total() {
            let summary = SessionSummary::new(session.score, session.total());
            info!(target: "quiz", session = %session.id, score = summary.score, total = summary.total, percentage = summary.percentage, tier = summary.tier.label(), "Quiz finished");
            self.phase = Phase::Finished(summary);
        }
        Ok(())
    }

    pub fn current_question(&self) -> Option<CurrentQuestion<'_>> {
        match &self.phase {
            Phase::Active(session) => {
                let index = session.current_index;
                Some(CurrentQuestion {
                    index,
                    total: session.total(),
                    score: session.score,
                    answered: session.answered[index],
                    spec: &session.questions[index],
                })
            }
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        match &self.phase {
            Phase::Finished(summary) => Some(summary),
            _ => None,
        }
    }

    /// Drop any session and go back to the setup screen.
    pub fn restart(&mut self) {
        debug!(target: "quiz", from = self.phase.name(), "Controller reset to setup");
        self.phase = Phase::Setup;
    }
}
