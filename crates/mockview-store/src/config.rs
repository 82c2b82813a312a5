//! Configuration loading and engine factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use mockview_core::aggregate::Aggregation;
use mockview_core::bank::{load_catalog, QuestionBank};
use mockview_core::engine::{EngineConfig, SessionEngine};
use mockview_core::model::DEFAULT_TOTAL_ROUNDS;
use mockview_core::traits::{NullStore, SessionStore};

use crate::file::FileStore;
use crate::memory::MemoryStore;

/// Environment variable that forces a file store at the given directory.
pub const STORE_PATH_ENV: &str = "MOCKVIEW_STORE_PATH";

/// Which session store backs the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// No persistence; the engine runs ephemerally.
    #[default]
    #[serde(rename = "none")]
    Disabled,
    /// In-process map, gone when the process exits. For embedding and tests;
    /// the CLI refuses it.
    Memory,
    /// One JSON file per document under a directory.
    File {
        #[serde(default = "default_data_dir")]
        path: PathBuf,
    },
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./mockview-data")
}

/// Top-level mockview configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockviewConfig {
    /// Session store backend.
    #[serde(default)]
    pub store: StoreConfig,
    /// Rounds per session.
    #[serde(default = "default_total_rounds")]
    pub total_rounds: u32,
    /// How summaries and reports are computed.
    #[serde(default)]
    pub aggregation: Aggregation,
    /// Optional TOML question catalog replacing the built-in one.
    #[serde(default)]
    pub question_catalog: Option<PathBuf>,
}

fn default_total_rounds() -> u32 {
    DEFAULT_TOTAL_ROUNDS
}

impl Default for MockviewConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            total_rounds: default_total_rounds(),
            aggregation: Aggregation::default(),
            question_catalog: None,
        }
    }
}

impl MockviewConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            total_rounds: self.total_rounds,
            aggregation: self.aggregation,
        }
    }
}

/// Expand `${VAR}` and `${VAR:-default}` references from the environment.
///
/// Unset or empty variables expand to the default, or to nothing. Expanded
/// values are not scanned again.
fn expand_env(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let body = &rest[start + 2..];
        let Some(end) = body.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let (name, default) = match body[..end].split_once(":-") {
            Some((name, default)) => (name, default),
            None => (&body[..end], ""),
        };
        match std::env::var(name) {
            Ok(value) if !value.is_empty() => out.push_str(&value),
            _ => out.push_str(default),
        }
        rest = &body[end + 1..];
    }
    out.push_str(rest);
    out
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(expand_env(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `mockview.toml` in the current directory
/// 2. `~/.config/mockview/config.toml`
///
/// Environment override: `MOCKVIEW_STORE_PATH` selects a file store.
pub fn load_config_from(path: Option<&Path>) -> Result<MockviewConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mockview.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<MockviewConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MockviewConfig::default(),
    };

    if let Ok(dir) = std::env::var(STORE_PATH_ENV) {
        if !dir.trim().is_empty() {
            config.store = StoreConfig::File {
                path: PathBuf::from(dir),
            };
        }
    }

    if let StoreConfig::File { path } = &config.store {
        config.store = StoreConfig::File {
            path: resolve_path(path),
        };
    }
    config.question_catalog = config.question_catalog.as_deref().map(resolve_path);

    anyhow::ensure!(
        config.total_rounds >= 1,
        "total_rounds must be at least 1"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mockview"))
}

/// Create a store from its configuration.
pub fn create_store(config: &StoreConfig) -> Arc<dyn SessionStore> {
    match config {
        StoreConfig::Disabled => Arc::new(NullStore),
        StoreConfig::Memory => Arc::new(MemoryStore::new()),
        StoreConfig::File { path } => Arc::new(FileStore::new(path.clone())),
    }
}

/// Assemble a session engine from configuration.
pub fn build_engine(config: &MockviewConfig) -> Result<SessionEngine> {
    let bank = match &config.question_catalog {
        Some(path) => Arc::new(load_catalog(path)?),
        None => QuestionBank::builtin(),
    };
    let store = create_store(&config.store);
    tracing::debug!(store = store.name(), questions = bank.len(), "engine assembled");
    Ok(SessionEngine::new(bank, store, config.engine_config()))
}
