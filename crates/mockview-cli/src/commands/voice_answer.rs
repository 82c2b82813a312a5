//! The `mockview voice-answer` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{engine, print_json};

pub async fn execute(
    config_path: Option<PathBuf>,
    session_id: String,
    question_id: String,
    audio: PathBuf,
) -> Result<()> {
    let bytes = tokio::fs::read(&audio)
        .await
        .with_context(|| format!("failed to read audio: {}", audio.display()))?;

    let engine = engine(config_path.as_deref())?;
    let feedback = engine
        .submit_voice_answer(&session_id, &question_id, &bytes)
        .await?;
    print_json(&feedback)
}
