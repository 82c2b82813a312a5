pub mod answer;
pub mod create;
pub mod health;
pub mod init;
pub mod pay;
pub mod pricing;
pub mod question;
pub mod report;
pub mod status;
pub mod summary;
pub mod voice_answer;

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use mockview_core::engine::SessionEngine;
use mockview_store::{build_engine, load_config_from, StoreConfig};

/// Load configuration and assemble the engine.
///
/// Every command is its own process, so an in-memory store would forget a
/// session before the next command could use it.
pub(crate) fn engine(config_path: Option<&Path>) -> Result<SessionEngine> {
    let config = load_config_from(config_path)?;
    tracing::debug!(store = ?config.store, total_rounds = config.total_rounds, "configuration loaded");
    if config.store == StoreConfig::Memory {
        anyhow::bail!(
            "store type \"memory\" does not persist between mockview commands; \
             use type = \"file\" or type = \"none\""
        );
    }
    build_engine(&config)
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
