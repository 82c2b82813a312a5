//! Answer scoring.
//!
//! The length-based text policy and the fixed voice signals stand in for a
//! real grader and a real audio analyzer.

use crate::model::{Feedback, VoiceFeedback, VoiceSignals};
use crate::traits::{AnswerScorer, VoiceAnalyzer};

/// Lowest content score a text answer can receive.
pub const MIN_CONTENT_SCORE: u32 = 30;
/// Highest content score a text answer can receive.
pub const MAX_CONTENT_SCORE: u32 = 100;
/// Scores strictly above this are marked correct.
pub const CORRECT_THRESHOLD: u32 = 60;

const GRAMMAR_NOTES: &str = "Capitalize proper nouns. Keep sentences concise.";
const TEXT_REFERENCE: &str = "Sample ideal answer with structured points and examples.";
const VOICE_REFERENCE: &str = "Ideal answer outline for the asked question.";

/// Signals reported for every voice answer.
pub const MOCK_VOICE_SIGNALS: VoiceSignals = VoiceSignals {
    tone: 78,
    clarity: 82,
    confidence: 75,
    grammar: 80,
};

/// Content score for an answer: one point per five trimmed characters on top
/// of a base of 40, clamped to 30..=100.
pub fn content_score(answer: &str) -> u32 {
    let len = u32::try_from(answer.trim().chars().count()).unwrap_or(u32::MAX);
    (len / 5)
        .saturating_add(40)
        .clamp(MIN_CONTENT_SCORE, MAX_CONTENT_SCORE)
}

/// Scores text answers by length.
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthScorer;

impl AnswerScorer for LengthScorer {
    fn score(&self, answer: &str) -> Feedback {
        let content_score = content_score(answer);
        Feedback {
            correct: content_score > CORRECT_THRESHOLD,
            grammar_fixes: GRAMMAR_NOTES.to_string(),
            content_score,
            correct_answer: TEXT_REFERENCE.to_string(),
            next_available: true,
        }
    }
}

/// Ignores the audio and reports [`MOCK_VOICE_SIGNALS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MockVoiceAnalyzer;

impl VoiceAnalyzer for MockVoiceAnalyzer {
    fn analyze(&self, _audio: &[u8]) -> VoiceFeedback {
        VoiceFeedback {
            signals: MOCK_VOICE_SIGNALS,
            correct_answer: VOICE_REFERENCE.to_string(),
        }
    }
}
