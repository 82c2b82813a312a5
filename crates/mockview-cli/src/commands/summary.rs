//! The `mockview summary` command.

use std::path::PathBuf;

use anyhow::Result;

use super::{engine, print_json};

pub async fn execute(config_path: Option<PathBuf>, session_id: String) -> Result<()> {
    let engine = engine(config_path.as_deref())?;
    let summary = engine.round_summary(&session_id).await?;
    print_json(&summary)
}
