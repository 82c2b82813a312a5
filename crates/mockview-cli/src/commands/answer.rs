//! The `mockview answer` command.

use std::path::PathBuf;

use anyhow::Result;

use super::{engine, print_json};

pub async fn execute(
    config_path: Option<PathBuf>,
    session_id: String,
    question_id: String,
    answer: String,
) -> Result<()> {
    let engine = engine(config_path.as_deref())?;
    let feedback = engine
        .submit_text_answer(&session_id, &question_id, &answer)
        .await?;
    print_json(&feedback)
}
