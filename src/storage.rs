//! JSON file store for the session snapshot.

use crate::game::snapshot::{hydrate_str, Snapshot};
use crate::game::Session;
use std::path::Path;
use tracing::{info, warn};

/// Loads the saved session, or a fresh one if nothing usable is on disk.
pub fn load(path: &Path) -> Session {
    match std::fs::read_to_string(path) {
        Ok(raw) => {
            info!(path = %path.display(), "restoring saved session");
            hydrate_str(&raw)
        }
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "could not read save file");
            }
            Session::new_random()
        }
    }
}

pub fn save(path: &Path, session: &Session) -> anyhow::Result<()> {
    let data = serde_json::to_string_pretty(&Snapshot::from_session(session))?;
    std::fs::write(path, data)?;
    Ok(())
}

pub fn remove(path: &Path) -> anyhow::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
