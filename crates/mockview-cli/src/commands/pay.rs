//! The `mockview pay` command. Records a receipt; no money moves.

use std::path::PathBuf;

use anyhow::Result;

use super::{engine, print_json};

pub async fn execute(config_path: Option<PathBuf>, amount: u32, mode: String) -> Result<()> {
    let engine = engine(config_path.as_deref())?;
    let receipt = engine.initiate_payment(amount, &mode).await?;
    print_json(&receipt)
}
