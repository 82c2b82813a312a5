//! The `mockview create` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use mockview_core::model::NewSession;

use super::{engine, print_json};

pub async fn execute(
    config_path: Option<PathBuf>,
    mode: String,
    job_role: String,
    experience: String,
    company: Option<String>,
    difficulty: String,
    resume: Option<PathBuf>,
) -> Result<()> {
    let resume_text = match resume {
        Some(path) => Some(
            std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read resume: {}", path.display()))?,
        ),
        None => None,
    };

    let engine = engine(config_path.as_deref())?;
    let created = engine
        .create_session(NewSession {
            mode,
            job_role,
            experience,
            company,
            difficulty,
            resume_text,
        })
        .await?;
    print_json(&created)
}
