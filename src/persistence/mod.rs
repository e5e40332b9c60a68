//! High score storage backends
//!
//! The simulation never touches the filesystem itself; it talks to a
//! [`ScoreStore`]. The file-backed store is used by the binary, the in-memory
//! store by tests and by platforms without a writable data directory.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Versioned on-disk envelope for the saved high score.
#[derive(Debug, Serialize, Deserialize)]
struct ScoreFile {
    version: u32,
    high_score: u64,
}

const SCORE_FILE_VERSION: u32 = 1;

/// Backend for persisting the best score across sessions.
///
/// Implementations must be infallible from the caller's point of view:
/// `load` falls back to zero and `save` swallows errors after logging them.
/// A broken disk should never take the game down.
pub trait ScoreStore {
    fn load(&self) -> u64;
    fn save(&mut self, high_score: u64);
}

/// JSON file in the user's data directory (or a caller-supplied path).
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the conventional location under the OS data directory.
    pub fn default_location() -> Self {
        let base = std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::home_dir().map(|h| h.join(".local/share")))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("asterfall").join("highscore.json"))
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> u64 {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) => {
                log::debug!("no saved high score at {:?}: {err}", self.path);
                return 0;
            }
        };
        match serde_json::from_str::<ScoreFile>(&data) {
            Ok(file) if file.version == SCORE_FILE_VERSION => {
                log::info!("loaded high score {}", file.high_score);
                file.high_score
            }
            Ok(file) => {
                log::warn!("unknown score file version {}, starting fresh", file.version);
                0
            }
            Err(err) => {
                log::warn!("corrupt score file {:?}: {err}", self.path);
                0
            }
        }
    }

    fn save(&mut self, high_score: u64) {
        let file = ScoreFile {
            version: SCORE_FILE_VERSION,
            high_score,
        };
        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(&file)?;
            fs::write(&self.path, json)
        })();
        if let Err(err) = result {
            log::warn!("failed to save high score to {:?}: {err}", self.path);
        }
    }
}

/// Volatile store; starts at zero every run.
#[derive(Debug, Default)]
pub struct MemoryStore {
    high_score: u64,
}

impl MemoryStore {
    pub fn with_score(high_score: u64) -> Self {
        Self { high_score }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.high_score
    }

    fn save(&mut self, high_score: u64) {
        self.high_score = high_score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("asterfall-test-{}", std::process::id()));
        let mut store = FileStore::new(dir.join("highscore.json"));
        assert_eq!(store.load(), 0);

        store.save(1234);
        assert_eq!(store.load(), 1234);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_zero() {
        let dir = std::env::temp_dir().join(format!("asterfall-corrupt-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("highscore.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileStore::new(path);
        assert_eq!(store.load(), 0);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unknown_version_falls_back_to_zero() {
        let dir = std::env::temp_dir().join(format!("asterfall-version-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("highscore.json");
        fs::write(&path, r#"{"version": 99, "high_score": 777}"#).unwrap();

        let store = FileStore::new(path);
        assert_eq!(store.load(), 0);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_memory_store_keeps_latest() {
        let mut store = MemoryStore::default();
        store.save(10);
        store.save(25);
        assert_eq!(store.load(), 25);
    }
}
