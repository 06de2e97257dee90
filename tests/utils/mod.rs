pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use mocks::{
    FailingPlayerStore, FakeClient, FakeSocket, GameSpy, RecordingSink, ScheduledAlert,
    SpyBlindAlerter,
};
#[allow(unused_imports)]
pub use setup::{
    engine_with_config, fast_blind_config, temp_league_path, EngineSetup, TempLeagueFile,
};
