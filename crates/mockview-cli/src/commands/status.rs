//! The `mockview status` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use mockview_core::model::{Session, SessionState};

use super::{engine, print_json};

#[derive(Serialize)]
struct Status {
    state: SessionState,
    session: Session,
}

pub async fn execute(config_path: Option<PathBuf>, session_id: String) -> Result<()> {
    let engine = engine(config_path.as_deref())?;
    let Some(session) = engine.session(&session_id).await? else {
        anyhow::bail!("session {session_id} is unavailable: no readable session store");
    };
    print_json(&Status {
        state: session.state(),
        session,
    })
}
