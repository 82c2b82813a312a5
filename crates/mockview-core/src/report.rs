//! Round summaries and final reports, with JSON persistence and Markdown output.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Day-by-day preparation plan attached to every final report.
pub const STUDY_PLAN: [&str; 5] = [
    "Day 1-2: Review data structures",
    "Day 3-4: Mock interviews (2/day)",
    "Day 5: Behavioral answers",
    "Day 6: System design drills",
    "Day 7: Full-length simulation",
];

/// Aggregate feedback for the rounds answered so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub score: u32,
    pub strengths: Vec<String>,
    pub mistakes: Vec<String>,
    pub tips: Vec<String>,
}

/// Skill areas scored in a final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Technical,
    Coding,
    Logical,
    HR,
    Communication,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Technical,
        Category::Coding,
        Category::Logical,
        Category::HR,
        Category::Communication,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Technical => "Technical",
            Category::Coding => "Coding",
            Category::Logical => "Logical",
            Category::HR => "HR",
            Category::Communication => "Communication",
        };
        f.write_str(name)
    }
}

/// End-of-session report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    pub categories: BTreeMap<Category, u32>,
    pub plan: Vec<String>,
    pub overall: u32,
}

impl FinalReport {
    /// The weakest category, if any were scored.
    pub fn weakest(&self) -> Option<(Category, u32)> {
        self.categories
            .iter()
            .min_by_key(|(_, score)| **score)
            .map(|(c, s)| (*c, *s))
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Render as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("## Interview Report\n\n");
        md.push_str(&format!("**Overall:** {}/100\n\n", self.overall));

        md.push_str("| Category | Score |\n|----------|-------|\n");
        for (category, score) in &self.categories {
            md.push_str(&format!("| {category} | {score} |\n"));
        }

        if !self.plan.is_empty() {
            md.push_str("\n### Study plan\n\n");
            for step in &self.plan {
                md.push_str(&format!("- {step}\n"));
            }
        }

        md
    }
}
