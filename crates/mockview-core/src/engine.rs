//! Session engine orchestrator.
//!
//! Creates sessions, hands out questions, scores answers and builds reports.
//! Store failures are logged and never fail an operation: without a
//! reachable store the engine runs ephemerally.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregation;
use crate::bank::QuestionBank;
use crate::error::{EngineError, StoreError};
use crate::ids::{make_id, RESPONSE_PREFIX, SESSION_PREFIX};
use crate::model::{
    Difficulty, Feedback, IssuedQuestion, Mode, NewSession, NextQuestion, Progress,
    QuestionView, Response, Session, SessionCreated, Submission, VoiceFeedback,
    DEFAULT_TOTAL_ROUNDS,
};
use crate::payment::{PaymentReceipt, PriceList};
use crate::report::{FinalReport, RoundSummary};
use crate::scoring::{LengthScorer, MockVoiceAnalyzer};
use crate::traits::{
    AnswerScorer, ReportAggregator, SessionStore, VoiceAnalyzer, ID_FIELD, PAYMENTS, RESPONSES,
    SESSIONS,
};

/// Collections listed at most in a health report.
const HEALTH_COLLECTION_LIMIT: usize = 10;
/// Store error messages are cut to this many characters in a health report.
const HEALTH_ERROR_LIMIT: usize = 50;

/// Configuration for the session engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Rounds per session.
    pub total_rounds: u32,
    /// How summaries and reports are computed.
    pub aggregation: Aggregation,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            aggregation: Aggregation::default(),
        }
    }
}

/// Backend and store status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub backend: String,
    pub store: String,
    pub configured: bool,
    pub connected: bool,
    pub collections: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The session engine.
pub struct SessionEngine {
    bank: Arc<QuestionBank>,
    store: Arc<dyn SessionStore>,
    scorer: Arc<dyn AnswerScorer>,
    voice: Arc<dyn VoiceAnalyzer>,
    aggregator: Arc<dyn ReportAggregator>,
    config: EngineConfig,
}

fn require(field: &str, value: &str) -> Result<(), EngineError> {
    if value.trim().is_empty() {
        return Err(EngineError::Validation(format!(
            "missing required field: {field}"
        )));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl SessionEngine {
    pub fn new(bank: Arc<QuestionBank>, store: Arc<dyn SessionStore>, config: EngineConfig) -> Self {
        Self {
            bank,
            store,
            scorer: Arc::new(LengthScorer),
            voice: Arc::new(MockVoiceAnalyzer),
            aggregator: config.aggregation.build(),
            config,
        }
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn AnswerScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_voice_analyzer(mut self, voice: Arc<dyn VoiceAnalyzer>) -> Self {
        self.voice = voice;
        self
    }

    pub fn with_aggregator(mut self, aggregator: Arc<dyn ReportAggregator>) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Validate and persist a new session.
    pub async fn create_session(&self, request: NewSession) -> Result<SessionCreated, EngineError> {
        let mode: Mode = request.mode.parse().map_err(EngineError::Validation)?;
        let difficulty: Difficulty = request
            .difficulty
            .parse()
            .map_err(EngineError::Validation)?;
        require("job_role", &request.job_role)?;
        require("experience", &request.experience)?;

        let now = Utc::now();
        let session = Session {
            id: make_id(SESSION_PREFIX),
            mode,
            job_role: request.job_role.trim().to_string(),
            experience: request.experience.trim().to_string(),
            company: non_blank(request.company),
            difficulty,
            resume_text: non_blank(request.resume_text),
            paid: true,
            progress: Progress::new(self.config.total_rounds),
            issued_questions: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.persist(SESSIONS, &session.id, &session).await;
        tracing::info!(session_id = %session.id, %mode, %difficulty, "session created");

        Ok(SessionCreated {
            session_id: session.id,
            progress: session.progress,
        })
    }

    /// Look up a session.
    ///
    /// `Ok(None)` means the store could not be consulted.
    pub async fn session(&self, session_id: &str) -> Result<Option<Session>, EngineError> {
        require("session_id", session_id)?;
        self.load_session(session_id).await
    }

    /// Draw the next question and advance the session by one round.
    ///
    /// `difficulty` defaults to `Mixed` and is not checked against the
    /// session's own difficulty.
    pub async fn next_question(
        &self,
        session_id: &str,
        difficulty: Option<&str>,
    ) -> Result<NextQuestion, EngineError> {
        require("session_id", session_id)?;
        let session = self.load_session(session_id).await?;

        let label = difficulty
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(Difficulty::Mixed.as_str());
        let question = self.bank.draw(label);

        let progress = match session {
            Some(mut session) => {
                let now = Utc::now();
                session.progress.advance();
                session.issued_questions.push(IssuedQuestion {
                    id: question.id.clone(),
                    difficulty: question.difficulty.clone(),
                    issued_at: now,
                });
                session.updated_at = now;
                self.persist(SESSIONS, &session.id, &session).await;
                tracing::debug!(
                    session_id,
                    current = session.progress.current,
                    total = session.progress.total,
                    "progress advanced"
                );
                session.progress
            }
            None => {
                let mut progress = Progress::new(self.config.total_rounds);
                progress.advance();
                progress
            }
        };

        Ok(NextQuestion {
            question: QuestionView::from(&question),
            progress,
        })
    }

    /// Score a text answer and record the response.
    pub async fn submit_text_answer(
        &self,
        session_id: &str,
        question_id: &str,
        answer: &str,
    ) -> Result<Feedback, EngineError> {
        self.check_issued(session_id, question_id).await?;

        let feedback = self.scorer.score(answer);
        self.record(
            session_id,
            question_id,
            Submission::Text {
                answer: answer.to_string(),
                feedback: feedback.clone(),
            },
        )
        .await;
        Ok(feedback)
    }

    /// Analyze a recorded answer and record the response.
    pub async fn submit_voice_answer(
        &self,
        session_id: &str,
        question_id: &str,
        audio: &[u8],
    ) -> Result<VoiceFeedback, EngineError> {
        self.check_issued(session_id, question_id).await?;

        let feedback = self.voice.analyze(audio);
        self.record(
            session_id,
            question_id,
            Submission::Voice {
                audio_bytes: audio.len(),
                feedback: feedback.clone(),
            },
        )
        .await;
        Ok(feedback)
    }

    /// Summary of the rounds answered so far.
    pub async fn round_summary(&self, session_id: &str) -> Result<RoundSummary, EngineError> {
        require("session_id", session_id)?;
        let (session, responses) = self.load_history(session_id).await?;
        Ok(self.aggregator.round_summary(session.as_ref(), &responses))
    }

    /// End-of-session report.
    pub async fn final_report(&self, session_id: &str) -> Result<FinalReport, EngineError> {
        require("session_id", session_id)?;
        let (session, responses) = self.load_history(session_id).await?;
        Ok(self.aggregator.final_report(session.as_ref(), &responses))
    }

    pub fn pricing(&self) -> PriceList {
        PriceList::new(self.config.total_rounds)
    }

    /// Record a mock payment. No money moves.
    pub async fn initiate_payment(
        &self,
        amount: u32,
        mode: &str,
    ) -> Result<PaymentReceipt, EngineError> {
        let mode: Mode = mode.parse().map_err(EngineError::Validation)?;
        if amount == 0 {
            return Err(EngineError::Validation(
                "amount must be greater than zero".to_string(),
            ));
        }

        let receipt = PaymentReceipt::new(amount, mode);
        self.persist(PAYMENTS, &receipt.transaction_id, &receipt)
            .await;
        tracing::info!(transaction_id = %receipt.transaction_id, amount, %mode, "payment initiated");
        Ok(receipt)
    }

    /// Report backend and store status.
    pub async fn health(&self) -> HealthReport {
        let configured = self.store.is_configured();
        let (connected, collections, error) = match self.store.list_collections().await {
            Ok(mut names) => {
                names.truncate(HEALTH_COLLECTION_LIMIT);
                (configured, names, None)
            }
            Err(e) => {
                let message: String = e.to_string().chars().take(HEALTH_ERROR_LIMIT).collect();
                (false, Vec::new(), Some(message))
            }
        };

        HealthReport {
            backend: "running".to_string(),
            store: self.store.name().to_string(),
            configured,
            connected,
            collections,
            error,
        }
    }

    // -----------------------------------------------------------------------
    // Store access
    // -----------------------------------------------------------------------

    async fn load_session(&self, session_id: &str) -> Result<Option<Session>, EngineError> {
        match self.store.get(SESSIONS, session_id).await {
            Ok(Some(doc)) => match serde_json::from_value::<Session>(doc) {
                Ok(session) => Ok(Some(session)),
                Err(e) => {
                    self.degraded("decode session", &StoreError::from(e));
                    Ok(None)
                }
            },
            Ok(None) => Err(EngineError::SessionNotFound(session_id.to_string())),
            Err(e) => {
                self.degraded("load session", &e);
                Ok(None)
            }
        }
    }

    async fn load_responses(&self, session_id: &str) -> Vec<Response> {
        let docs = match self.store.find(RESPONSES, "session_id", session_id).await {
            Ok(docs) => docs,
            Err(e) => {
                self.degraded("load responses", &e);
                return Vec::new();
            }
        };

        let mut responses: Vec<Response> = docs
            .into_iter()
            .filter_map(|doc| match serde_json::from_value(doc) {
                Ok(response) => Some(response),
                Err(e) => {
                    tracing::warn!(session_id, error = %e, "skipping unreadable response");
                    None
                }
            })
            .collect();
        responses.sort_by_key(|r| r.created_at);
        responses
    }

    async fn load_history(
        &self,
        session_id: &str,
    ) -> Result<(Option<Session>, Vec<Response>), EngineError> {
        futures::try_join!(self.load_session(session_id), async {
            Ok::<_, EngineError>(self.load_responses(session_id).await)
        })
    }

    /// Fails when the store knows the session and it never received the question.
    async fn check_issued(&self, session_id: &str, question_id: &str) -> Result<(), EngineError> {
        require("session_id", session_id)?;
        require("question_id", question_id)?;

        if let Some(session) = self.load_session(session_id).await? {
            if session.issued(question_id).is_none() {
                return Err(EngineError::QuestionNotIssued {
                    session_id: session_id.to_string(),
                    question_id: question_id.to_string(),
                });
            }
        }
        Ok(())
    }

    async fn record(&self, session_id: &str, question_id: &str, submission: Submission) {
        let response = Response {
            id: make_id(RESPONSE_PREFIX),
            session_id: session_id.to_string(),
            question_id: question_id.to_string(),
            submission,
            created_at: Utc::now(),
        };
        self.persist(RESPONSES, &response.id, &response).await;
    }

    async fn persist<T: Serialize + Sync>(&self, collection: &str, id: &str, value: &T) {
        let result = match serde_json::to_value(value) {
            Ok(mut doc) => {
                if let Some(fields) = doc.as_object_mut() {
                    fields.insert(ID_FIELD.to_string(), id.into());
                }
                self.store.put(collection, doc).await
            }
            Err(e) => Err(StoreError::from(e)),
        };
        if let Err(e) = result {
            self.degraded(&format!("persist {collection}"), &e);
        }
    }

    fn degraded(&self, action: &str, error: &StoreError) {
        if error.is_unconfigured() {
            tracing::debug!(store = self.store.name(), "{action}: no store configured");
        } else {
            tracing::warn!(
                store = self.store.name(),
                error = %error,
                "{action} failed, continuing without persistence"
            );
        }
    }
}
