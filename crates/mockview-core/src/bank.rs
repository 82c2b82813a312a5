//! Question bank: a read-only catalog of interview prompts by difficulty.
//!
//! The built-in catalog is initialised once per process. Custom catalogs can
//! be loaded from TOML files of the form:
//!
//! ```toml
//! [[questions]]
//! difficulty = "Easy"
//! text = "What is a REST API?"
//! ideal_answer = "An architectural style ..."
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::ids::{make_id, QUESTION_PREFIX};
use crate::model::{Difficulty, Question};

/// Prompt served when the requested level has nothing in the catalog.
pub const FALLBACK_PROMPT: &str = "Tell me about yourself.";
/// Reference answer for [`FALLBACK_PROMPT`].
pub const FALLBACK_ANSWER: &str =
    "Give a concise summary of your background, achievements, and goals.";

const BUILTIN: &[(Difficulty, &str, &str)] = &[
    (
        Difficulty::Easy,
        "Explain the difference between HTTP and HTTPS.",
        "HTTPS is HTTP over TLS providing encryption, integrity, and authentication.",
    ),
    (
        Difficulty::Easy,
        "What is a REST API?",
        "An architectural style using stateless communication over HTTP with resources identified by URIs.",
    ),
    (
        Difficulty::Intermediate,
        "Describe how you would design a URL shortener.",
        "Use hash/id mapping, datastore, caching, redirect service, rate limiting, and analytics.",
    ),
    (
        Difficulty::Intermediate,
        "Explain CAP theorem.",
        "In distributed systems you can only have two of Consistency, Availability, and Partition tolerance.",
    ),
    (
        Difficulty::Advanced,
        "How does a garbage collector work in managed runtimes?",
        "It tracks object reachability, reclaims unreachable memory via algorithms like mark-sweep, generational GC.",
    ),
    (
        Difficulty::Advanced,
        "What strategies would you use to scale a write-heavy database?",
        "Sharding, write queues, batching, eventual consistency, appropriate indexes, partitioning.",
    ),
];

/// A prompt and its reference answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankEntry {
    pub text: String,
    pub ideal_answer: String,
}

/// Catalog of prompts keyed by concrete level. Never keyed by `Mixed`.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    entries: HashMap<Difficulty, Vec<BankEntry>>,
}

impl QuestionBank {
    /// The process-wide built-in catalog.
    pub fn builtin() -> Arc<QuestionBank> {
        static BANK: OnceLock<Arc<QuestionBank>> = OnceLock::new();
        BANK.get_or_init(|| {
            let mut bank = QuestionBank::default();
            for (level, text, answer) in BUILTIN {
                bank.entries.entry(*level).or_default().push(BankEntry {
                    text: (*text).to_string(),
                    ideal_answer: (*answer).to_string(),
                });
            }
            Arc::new(bank)
        })
        .clone()
    }

    /// Entries stored under a concrete level.
    pub fn entries(&self, level: Difficulty) -> &[BankEntry] {
        self.entries.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of prompts across all levels.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Draw a random question for a difficulty label.
    pub fn draw(&self, label: &str) -> Question {
        self.draw_with(label, &mut rand::thread_rng())
    }

    /// Draw with a caller-supplied RNG.
    ///
    /// `Mixed` draws from every level, tagging each candidate with its source
    /// level. Any other label draws from that level only. A label with no
    /// entries (including unknown labels) yields the fallback prompt tagged
    /// with the label as given.
    pub fn draw_with<R: Rng + ?Sized>(&self, label: &str, rng: &mut R) -> Question {
        let pool: Vec<(&BankEntry, &str)> = match label.parse::<Difficulty>() {
            Ok(Difficulty::Mixed) => Difficulty::LEVELS
                .iter()
                .flat_map(|level| {
                    self.entries(*level)
                        .iter()
                        .map(move |e| (e, level.as_str()))
                })
                .collect(),
            Ok(level) => self.entries(level).iter().map(|e| (e, label)).collect(),
            Err(_) => Vec::new(),
        };

        let (text, answer, difficulty) = match pool.choose(rng) {
            Some((entry, level)) => (
                entry.text.as_str(),
                entry.ideal_answer.as_str(),
                *level,
            ),
            None => (FALLBACK_PROMPT, FALLBACK_ANSWER, label),
        };

        tracing::debug!(requested = label, drawn = difficulty, "drew question");

        Question {
            id: make_id(QUESTION_PREFIX),
            text: text.to_string(),
            difficulty: difficulty.to_string(),
            correct_answer: answer.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    difficulty: String,
    text: String,
    ideal_answer: String,
}

/// Load a catalog from a TOML file.
pub fn load_catalog(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question catalog: {}", path.display()))?;
    parse_catalog_str(&content)
        .with_context(|| format!("invalid question catalog: {}", path.display()))
}

/// Parse a TOML catalog string.
pub fn parse_catalog_str(content: &str) -> Result<QuestionBank> {
    let parsed: TomlCatalog = toml::from_str(content).context("failed to parse TOML")?;

    let mut bank = QuestionBank::default();
    for (i, q) in parsed.questions.into_iter().enumerate() {
        let level: Difficulty = q
            .difficulty
            .parse()
            .map_err(|e: String| anyhow::anyhow!("question {}: {e}", i + 1))?;
        anyhow::ensure!(
            level != Difficulty::Mixed,
            "question {}: 'Mixed' is not a catalog level",
            i + 1
        );
        anyhow::ensure!(
            !q.text.trim().is_empty(),
            "question {}: text is empty",
            i + 1
        );
        bank.entries.entry(level).or_default().push(BankEntry {
            text: q.text,
            ideal_answer: q.ideal_answer,
        });
    }
    Ok(bank)
}
