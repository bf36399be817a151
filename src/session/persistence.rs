//! JSON persistence of the session transcript and memory bank
//!
//! Only the transcript and the memory bank are persisted; metrics and
//! toggles are recreated fresh each run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::{ChatMessage, MemoryItem, SessionState};

/// The persisted partition of the session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub messages: Vec<ChatMessage>,
    pub memory: Vec<MemoryItem>,
}

impl SessionSnapshot {
    /// Capture the persisted partition of a session
    pub fn capture(session: &SessionState) -> Self {
        SessionSnapshot {
            messages: session.messages().to_vec(),
            memory: session.memory().to_vec(),
        }
    }

    /// Restore the snapshot into a fresh session
    ///
    /// Ids and timestamps are preserved; metrics and toggles come up with
    /// their defaults.
    pub fn restore(self) -> SessionState {
        let mut session = SessionState::new();
        session.messages = self.messages;
        session.memory = self.memory;
        session
    }
}

/// Default session file path
pub fn session_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".neurolink").join("session.json"))
}

/// Save the session's persisted partition to `path`
pub fn save(session: &SessionState, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create session directory")?;
    }

    let snapshot = SessionSnapshot::capture(session);
    let json = serde_json::to_string_pretty(&snapshot).context("Failed to serialize session")?;

    fs::write(path, json).context("Failed to write session file")?;

    Ok(())
}

/// Load a session from `path`, or a fresh one if the file is absent
pub fn load(path: &Path) -> Result<SessionState> {
    if !path.exists() {
        return Ok(SessionState::new());
    }

    let contents = fs::read_to_string(path).context("Failed to read session file")?;
    let snapshot: SessionSnapshot =
        serde_json::from_str(&contents).context("Failed to parse session file")?;

    Ok(snapshot.restore())
}
