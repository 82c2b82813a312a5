//! The `mockview question` command.

use std::path::PathBuf;

use anyhow::Result;

use super::{engine, print_json};

pub async fn execute(
    config_path: Option<PathBuf>,
    session_id: String,
    difficulty: Option<String>,
) -> Result<()> {
    let engine = engine(config_path.as_deref())?;
    let next = engine
        .next_question(&session_id, difficulty.as_deref())
        .await?;
    print_json(&next)
}
