//! Report aggregation over a session's responses.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, Response, Session, Submission};
use crate::report::{Category, FinalReport, RoundSummary, STUDY_PLAN};
use crate::traits::ReportAggregator;

/// Tips included in every round summary.
pub const STANDARD_TIPS: [&str; 3] = ["Use STAR format", "Quantify impact", "Conclude crisply"];

/// Which aggregator the engine is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Fold over stored responses.
    #[default]
    Responses,
    /// Fixed placeholder figures.
    Fixed,
}

impl Aggregation {
    pub fn build(self) -> Arc<dyn ReportAggregator> {
        match self {
            Aggregation::Responses => Arc::new(ResponseAggregator),
            Aggregation::Fixed => Arc::new(FixedAggregator),
        }
    }
}

fn plan() -> Vec<String> {
    STUDY_PLAN.iter().map(|s| s.to_string()).collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Fixed figures
// ---------------------------------------------------------------------------

/// Returns the same summary and report for every session.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAggregator;

impl ReportAggregator for FixedAggregator {
    fn round_summary(&self, _: Option<&Session>, _: &[Response]) -> RoundSummary {
        RoundSummary {
            score: 76,
            strengths: strings(&["Clear structure", "Good examples"]),
            mistakes: strings(&["Missed edge cases", "Overlong intro"]),
            tips: strings(&STANDARD_TIPS),
        }
    }

    fn final_report(&self, _: Option<&Session>, _: &[Response]) -> FinalReport {
        FinalReport {
            categories: Category::ALL
                .into_iter()
                .zip([78, 72, 80, 70, 82])
                .collect(),
            plan: plan(),
            overall: 76,
        }
    }
}

// ---------------------------------------------------------------------------
// Folding over responses
// ---------------------------------------------------------------------------

/// Computes summaries and reports from the responses actually submitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseAggregator;

fn mean(values: impl IntoIterator<Item = u32>) -> Option<u32> {
    let (sum, n) = values
        .into_iter()
        .fold((0u64, 0u64), |(sum, n), v| (sum + u64::from(v), n + 1));
    (n > 0).then(|| ((sum + n / 2) / n) as u32)
}

/// Where a response's question came from, when the session recorded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Intermediate or Advanced prompt.
    Technical,
    /// Easy or fallback prompt.
    General,
    Unknown,
}

fn origin(session: Option<&Session>, response: &Response) -> Origin {
    let Some(issued) = session.and_then(|s| s.issued(&response.question_id)) else {
        return Origin::Unknown;
    };
    match issued.difficulty.parse::<Difficulty>() {
        Ok(Difficulty::Intermediate | Difficulty::Advanced) => Origin::Technical,
        _ => Origin::General,
    }
}

struct Tally {
    text_total: u32,
    text_correct: u32,
    text_scores: Vec<u32>,
    clarity: Option<u32>,
    confidence: Option<u32>,
    voice_communication: Option<u32>,
}

impl Tally {
    fn new(responses: &[Response]) -> Self {
        let mut text_scores = Vec::new();
        let mut text_correct = 0;
        let mut voice = Vec::new();
        for r in responses {
            match &r.submission {
                Submission::Text { feedback, .. } => {
                    text_scores.push(feedback.content_score);
                    if feedback.correct {
                        text_correct += 1;
                    }
                }
                Submission::Voice { feedback, .. } => voice.push(feedback.signals),
            }
        }
        Self {
            text_total: text_scores.len() as u32,
            text_correct,
            text_scores,
            clarity: mean(voice.iter().map(|s| s.clarity)),
            confidence: mean(voice.iter().map(|s| s.confidence)),
            voice_communication: mean(voice.iter().map(|s| (s.clarity + s.grammar + 1) / 2)),
        }
    }
}

fn unanswered(session: Option<&Session>, responses: &[Response]) -> usize {
    session.map_or(0, |s| {
        s.issued_questions
            .iter()
            .filter(|q| !responses.iter().any(|r| r.question_id == q.id))
            .count()
    })
}

impl ReportAggregator for ResponseAggregator {
    fn round_summary(&self, session: Option<&Session>, responses: &[Response]) -> RoundSummary {
        let mut tips = strings(&STANDARD_TIPS);
        let Some(score) = mean(responses.iter().map(|r| r.submission.score())) else {
            return RoundSummary {
                score: 0,
                strengths: Vec::new(),
                mistakes: vec!["No answers submitted yet".to_string()],
                tips,
            };
        };

        let tally = Tally::new(responses);
        let mut strengths = Vec::new();
        let mut mistakes = Vec::new();

        if tally.text_correct > 0 {
            strengths.push(format!(
                "Answered {} of {} questions in depth",
                tally.text_correct, tally.text_total
            ));
        }
        if mean(tally.text_scores.iter().copied()).is_some_and(|s| s >= 70) {
            strengths.push("Detailed, well-developed answers".to_string());
        }
        if tally.clarity.is_some_and(|c| c >= 80) {
            strengths.push("Clear delivery".to_string());
        }

        let brief = tally.text_total - tally.text_correct;
        if brief > 0 {
            mistakes.push(format!(
                "{brief} answer(s) too brief to cover the key points"
            ));
            tips.push("Expand each answer with a concrete example".to_string());
        }
        if tally.confidence.is_some_and(|c| c < 80) {
            mistakes.push("Hesitant delivery in spoken answers".to_string());
            tips.push("Pause before answering to sound more confident".to_string());
        }
        let skipped = unanswered(session, responses);
        if skipped > 0 {
            mistakes.push(format!("{skipped} question(s) left unanswered"));
        }

        RoundSummary {
            score,
            strengths,
            mistakes,
            tips,
        }
    }

    fn final_report(&self, session: Option<&Session>, responses: &[Response]) -> FinalReport {
        let Some(technical) = mean(responses.iter().map(|r| r.submission.score())) else {
            return FinalReport {
                categories: Category::ALL.into_iter().map(|c| (c, 0)).collect(),
                plan: plan(),
                overall: 0,
            };
        };

        let tally = Tally::new(responses);
        let scores_from = |wanted: Origin| {
            mean(
                responses
                    .iter()
                    .filter(|r| origin(session, r) == wanted)
                    .map(|r| r.submission.score()),
            )
        };
        let logical = (tally.text_total > 0)
            .then(|| (tally.text_correct * 100 + tally.text_total / 2) / tally.text_total);

        let mut categories = BTreeMap::new();
        categories.insert(Category::Technical, technical);
        categories.insert(
            Category::Coding,
            scores_from(Origin::Technical).unwrap_or(technical),
        );
        categories.insert(Category::Logical, logical.unwrap_or(technical));
        categories.insert(
            Category::HR,
            scores_from(Origin::General).unwrap_or(technical),
        );
        categories.insert(
            Category::Communication,
            tally.voice_communication.unwrap_or(technical),
        );

        let overall = mean(categories.values().copied()).unwrap_or(0);

        FinalReport {
            categories,
            plan: plan(),
            overall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Feedback, IssuedQuestion, Mode, Progress, VoiceFeedback, DEFAULT_TOTAL_ROUNDS,
    };
    use crate::scoring::MOCK_VOICE_SIGNALS;
    use chrono::Utc;

    fn session(issued: &[(&str, &str)]) -> Session {
        let now = Utc::now();
        Session {
            id: "sess_t".into(),
            mode: Mode::Text,
            job_role: "Backend Engineer".into(),
            experience: "2 years".into(),
            company: None,
            difficulty: Difficulty::Mixed,
            resume_text: None,
            paid: true,
            progress: Progress::new(DEFAULT_TOTAL_ROUNDS),
            issued_questions: issued
                .iter()
                .map(|(id, level)| IssuedQuestion {
                    id: id.to_string(),
                    difficulty: level.to_string(),
                    issued_at: now,
                })
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    fn text(question_id: &str, score: u32) -> Response {
        Response {
            id: format!("resp_{question_id}"),
            session_id: "sess_t".into(),
            question_id: question_id.into(),
            submission: Submission::Text {
                answer: String::new(),
                feedback: Feedback {
                    correct: score > 60,
                    grammar_fixes: String::new(),
                    content_score: score,
                    correct_answer: String::new(),
                    next_available: true,
                },
            },
            created_at: Utc::now(),
        }
    }

    fn voice(question_id: &str) -> Response {
        Response {
            id: format!("resp_{question_id}"),
            session_id: "sess_t".into(),
            question_id: question_id.into(),
            submission: Submission::Voice {
                audio_bytes: 1024,
                feedback: VoiceFeedback {
                    signals: MOCK_VOICE_SIGNALS,
                    correct_answer: String::new(),
                },
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn fixed_figures() {
        let summary = FixedAggregator.round_summary(None, &[]);
        assert_eq!(summary.score, 76);
        assert_eq!(summary.tips.len(), 3);
        let report = FixedAggregator.final_report(None, &[]);
        assert_eq!(report.categories[&Category::Communication], 82);
        assert_eq!(report.overall, 76);
        assert_eq!(report.plan.len(), 5);
    }

    #[test]
    fn empty_session() {
        let summary = ResponseAggregator.round_summary(None, &[]);
        assert_eq!(summary.score, 0);
        assert_eq!(summary.mistakes, vec!["No answers submitted yet"]);
        let report = ResponseAggregator.final_report(None, &[]);
        assert_eq!(report.overall, 0);
        assert_eq!(report.categories.len(), 5);
        assert!(report.categories.values().all(|s| *s == 0));
    }

    #[test]
    fn summary_reflects_answers() {
        let s = session(&[("q1", "Easy"), ("q2", "Advanced"), ("q3", "Easy")]);
        let responses = [text("q1", 80), text("q2", 45)];
        let summary = ResponseAggregator.round_summary(Some(&s), &responses);

        assert_eq!(summary.score, 63);
        assert!(summary.strengths.iter().any(|m| m == "Answered 1 of 2 questions in depth"));
        assert!(summary.mistakes.iter().any(|m| m.starts_with("1 answer(s) too brief")));
        assert!(summary.mistakes.iter().any(|m| m == "1 question(s) left unanswered"));
        assert!(summary.tips.len() > STANDARD_TIPS.len());
    }

    #[test]
    fn report_splits_by_question_level() {
        let s = session(&[("q1", "Easy"), ("q2", "Advanced"), ("q3", "Intermediate")]);
        let responses = [text("q1", 50), text("q2", 90), text("q3", 70)];
        let report = ResponseAggregator.final_report(Some(&s), &responses);

        assert_eq!(report.categories[&Category::Technical], 70);
        assert_eq!(report.categories[&Category::Coding], 80);
        assert_eq!(report.categories[&Category::HR], 50);
        assert_eq!(report.categories[&Category::Logical], 67);
        // No voice answers: communication follows the overall technical mean.
        assert_eq!(report.categories[&Category::Communication], 70);
        assert_eq!(report.overall, 67);
    }

    #[test]
    fn voice_answers_drive_communication() {
        let s = session(&[("q1", "Hard")]);
        let report = ResponseAggregator.final_report(Some(&s), &[voice("q1")]);
        assert_eq!(report.categories[&Category::Communication], 81);
        // Unknown labels come from the fallback prompt.
        assert_eq!(report.categories[&Category::HR], 79);

        let summary = ResponseAggregator.round_summary(Some(&s), &[voice("q1")]);
        assert!(summary.strengths.iter().any(|m| m == "Clear delivery"));
        assert!(summary
            .mistakes
            .iter()
            .any(|m| m == "Hesitant delivery in spoken answers"));
    }

    #[test]
    fn without_session_everything_is_technical() {
        let report = ResponseAggregator.final_report(None, &[text("q1", 90)]);
        assert_eq!(report.categories[&Category::Coding], 90);
        assert_eq!(report.categories[&Category::HR], 90);
        assert_eq!(report.categories[&Category::Logical], 100);
    }

    #[test]
    fn aggregation_config_names() {
        let parsed: Aggregation = serde_json::from_str("\"fixed\"").unwrap();
        assert_eq!(parsed, Aggregation::Fixed);
        assert_eq!(Aggregation::default(), Aggregation::Responses);
        assert_eq!(Aggregation::Fixed.build().round_summary(None, &[]).score, 76);
    }
}
