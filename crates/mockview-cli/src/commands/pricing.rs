//! The `mockview pricing` command.

use std::path::PathBuf;

use anyhow::Result;

use super::{engine, print_json};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let engine = engine(config_path.as_deref())?;
    print_json(&engine.pricing())
}
