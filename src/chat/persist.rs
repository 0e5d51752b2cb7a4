use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Message;

const SNAPSHOT_FILE: &str = "snapshot.json";
const SNAPSHOT_VERSION: &str = "1";

/// On-disk shape of the persisted conversation.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: String,
    conversation_id: Option<String>,
    messages: Vec<Message>,
}

/// Persists the transcript and conversation id under the state directory.
/// Every operation fails soft: a missing or corrupted snapshot loads as empty
/// state, and a failed save leaves the previous snapshot untouched.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(SNAPSHOT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved transcript and conversation id. Never errors; anything
    /// unreadable comes back as empty state.
    pub fn load(&self) -> (Vec<Message>, Option<String>) {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return (Vec::new(), None);
            }
            Err(e) => {
                eprintln!("Failed to read snapshot {}: {}", self.path.display(), e);
                return (Vec::new(), None);
            }
        };

        match serde_json::from_str::<Snapshot>(&json) {
            Ok(snapshot) => {
                if snapshot.version != SNAPSHOT_VERSION {
                    eprintln!(
                        "Snapshot {} has version {:?}, expected {:?}; loading anyway",
                        self.path.display(),
                        snapshot.version,
                        SNAPSHOT_VERSION
                    );
                }
                (snapshot.messages, snapshot.conversation_id)
            }
            Err(e) => {
                eprintln!(
                    "Failed to parse snapshot {}: {}; starting empty",
                    self.path.display(),
                    e
                );
                (Vec::new(), None)
            }
        }
    }

    /// Write the current transcript and conversation id. Writes go through a
    /// temporary file and a rename, so a failure cannot clobber the previous
    /// snapshot.
    pub fn save(&self, messages: &[Message], conversation_id: Option<&str>) {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION.to_string(),
            conversation_id: conversation_id.map(|id| id.to_string()),
            messages: messages.to_vec(),
        };

        let json = match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Failed to serialize snapshot: {}", e);
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("Failed to create state directory {}: {}", parent.display(), e);
                return;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp_path, json) {
            eprintln!("Failed to write snapshot {}: {}", tmp_path.display(), e);
            return;
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            eprintln!("Failed to replace snapshot {}: {}", self.path.display(), e);
        }
    }

    /// Remove the snapshot. A snapshot that was never written is not an error.
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                eprintln!("Failed to remove snapshot {}: {}", self.path.display(), e);
            }
        }
    }
}
