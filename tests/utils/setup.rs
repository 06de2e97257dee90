#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use poker::{
    league::InMemoryPlayerStore, BlindAlerter, BlindConfig, GameEngine, PlayerStore,
    TokioBlindAlerter,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// Unique league file path under the system temp dir. The file is not created.
pub fn temp_league_path() -> PathBuf {
    std::env::temp_dir().join(format!("poker-test-{}.json", uuid::Uuid::new_v4()))
}

/// Removes a league file and its temporary sibling when dropped
pub struct TempLeagueFile {
    pub path: PathBuf,
}

impl TempLeagueFile {
    pub fn new() -> Self {
        Self {
            path: temp_league_path(),
        }
    }
}

impl Drop for TempLeagueFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
        let _ = std::fs::remove_file(format!("{}.tmp", self.path.display()));
    }
}

/// Blind config where one step of spacing is a millisecond
pub fn fast_blind_config() -> BlindConfig {
    BlindConfig {
        unit: Duration::from_millis(1),
        ..BlindConfig::default()
    }
}

pub struct EngineSetup {
    pub engine: GameEngine,
    pub store: Arc<InMemoryPlayerStore>,
}

/// Engine with a real tokio alerter and an in-memory store
pub fn engine_with_config(config: BlindConfig) -> EngineSetup {
    let store = Arc::new(InMemoryPlayerStore::new());
    let alerter: Arc<dyn BlindAlerter> = Arc::new(TokioBlindAlerter::new());
    let player_store: Arc<dyn PlayerStore> = store.clone();
    EngineSetup {
        engine: GameEngine::new(alerter, player_store, config),
        store,
    }
}
