// Library crate for the poker blind timer and league
// This file exposes the public API for the binary and integration tests

pub mod blinds;
pub mod cli;
pub mod config;
pub mod game;
pub mod league;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use blinds::{AlertSink, BlindAlerter, BlindConfig, BlindSchedule, TokioBlindAlerter};
pub use cli::Cli;
pub use config::AppConfig;
pub use game::{Game, GameEngine, GameError, GameState};
pub use league::{League, Player, PlayerStore, StoreError};
pub use shared::{AppError, AppState};
