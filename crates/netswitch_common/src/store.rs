//! State file persistence, shared by the daemon and the CLI.
//!
//! Missing or malformed state is never an error: the engine just starts
//! from the initial state and rebuilds it on the next save.

use crate::error::NetswitchError;
use crate::types::State;
use std::path::Path;
use tracing::debug;

/// Load persisted state, falling back to the initial state when the
/// file is absent or unparsable.
pub async fn load_state(path: &Path) -> State {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                debug!(
                    "State file {} unparsable ({}), starting fresh",
                    path.display(),
                    e
                );
                State::initial()
            }
        },
        Err(_) => State::initial(),
    }
}

/// Persist state as pretty JSON, creating the parent directory if needed.
pub async fn save_state(path: &Path, state: &State) -> Result<(), NetswitchError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(state)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
