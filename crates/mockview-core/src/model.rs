//! Core data model types for mockview.
//!
//! Sessions, questions, responses and the feedback records derived from
//! them. Documents written to the store are the serde form of these types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of rounds in a session unless configured otherwise.
pub const DEFAULT_TOTAL_ROUNDS: u32 = 5;

/// How the candidate answers questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Text,
    Voice,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Text => "text",
            Mode::Voice => "voice",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Mode::Text),
            "voice" => Ok(Mode::Voice),
            other => Err(format!("unknown mode: '{other}' (expected text or voice)")),
        }
    }
}

/// Question difficulty requested for a session or a single round.
///
/// `Mixed` is a request for "any level" and never keys the question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Intermediate,
    Advanced,
    Mixed,
}

impl Difficulty {
    /// The concrete levels `Mixed` expands to, in catalog order.
    pub const LEVELS: [Difficulty; 3] = [
        Difficulty::Easy,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Difficulty::Easy),
            "Intermediate" => Ok(Difficulty::Intermediate),
            "Advanced" => Ok(Difficulty::Advanced),
            "Mixed" => Ok(Difficulty::Mixed),
            other => Err(format!(
                "unknown difficulty: '{other}' (expected Easy, Intermediate, Advanced or Mixed)"
            )),
        }
    }
}

/// Round accounting for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Rounds issued so far.
    pub current: u32,
    /// Rounds in the session.
    pub total: u32,
}

impl Progress {
    pub fn new(total: u32) -> Self {
        Self { current: 0, total }
    }

    /// Move to the next round. Never exceeds `total`.
    pub fn advance(&mut self) {
        self.current = (self.current + 1).min(self.total);
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }

    pub fn state(&self) -> SessionState {
        if self.is_complete() {
            SessionState::Completed
        } else if self.current == 0 {
            SessionState::Created
        } else {
            SessionState::InProgress
        }
    }
}

/// Lifecycle state, derived from progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Created,
    InProgress,
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Created => write!(f, "created"),
            SessionState::InProgress => write!(f, "in progress"),
            SessionState::Completed => write!(f, "completed"),
        }
    }
}

/// Raw session creation request, validated by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSession {
    pub mode: String,
    pub job_role: String,
    pub experience: String,
    #[serde(default)]
    pub company: Option<String>,
    pub difficulty: String,
    #[serde(default)]
    pub resume_text: Option<String>,
}

/// A mock-interview attempt. Stored as a document in the `session` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "_id")]
    pub id: String,
    pub mode: Mode,
    pub job_role: String,
    pub experience: String,
    #[serde(default)]
    pub company: Option<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub resume_text: Option<String>,
    /// Payment is settled before a session is created.
    pub paid: bool,
    pub progress: Progress,
    /// Questions handed out to this session, oldest first.
    #[serde(default)]
    pub issued_questions: Vec<IssuedQuestion>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn state(&self) -> SessionState {
        self.progress.state()
    }

    pub fn issued(&self, question_id: &str) -> Option<&IssuedQuestion> {
        self.issued_questions.iter().find(|q| q.id == question_id)
    }
}

/// Record of a question drawn for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedQuestion {
    pub id: String,
    /// Level the question was drawn from (may be an unknown label).
    pub difficulty: String,
    pub issued_at: DateTime<Utc>,
}

/// Returned from session creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: String,
    pub progress: Progress,
}

/// A drawn interview question. A value, copied out of the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub difficulty: String,
    pub correct_answer: String,
}

/// The part of a question shown to the candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: String,
    pub text: String,
    pub difficulty: String,
}

impl From<&Question> for QuestionView {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            text: q.text.clone(),
            difficulty: q.difficulty.clone(),
        }
    }
}

/// Returned from a question fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextQuestion {
    pub question: QuestionView,
    pub progress: Progress,
}

/// Scored result of a text answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub correct: bool,
    pub grammar_fixes: String,
    /// Always within 30..=100.
    pub content_score: u32,
    pub correct_answer: String,
    pub next_available: bool,
}

/// Delivery signals for a spoken answer, each 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSignals {
    pub tone: u32,
    pub clarity: u32,
    pub confidence: u32,
    pub grammar: u32,
}

impl VoiceSignals {
    /// Rounded mean of the four signals.
    pub fn mean(&self) -> u32 {
        (self.tone + self.clarity + self.confidence + self.grammar + 2) / 4
    }
}

/// Result of a voice answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceFeedback {
    #[serde(flatten)]
    pub signals: VoiceSignals,
    pub correct_answer: String,
}

/// What was submitted and how it was scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Submission {
    Text { answer: String, feedback: Feedback },
    Voice { audio_bytes: usize, feedback: VoiceFeedback },
}

impl Submission {
    /// Single 0..=100 score used by aggregation.
    pub fn score(&self) -> u32 {
        match self {
            Submission::Text { feedback, .. } => feedback.content_score,
            Submission::Voice { feedback, .. } => feedback.signals.mean(),
        }
    }
}

/// One answered round. Appended to the `response` collection, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "_id")]
    pub id: String,
    pub session_id: String,
    pub question_id: String,
    pub submission: Submission,
    pub created_at: DateTime<Utc>,
}
