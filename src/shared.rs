use std::sync::Arc;
use thiserror::Error;

use crate::blinds::{BlindAlerter, BlindConfig};
use crate::config::ConfigError;
use crate::game::{GameEngine, GameError};
use crate::league::{PlayerStore, StoreError};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub player_store: Arc<dyn PlayerStore>,
    pub blind_alerter: Arc<dyn BlindAlerter>,
    pub blind_config: BlindConfig,
}

impl AppState {
    pub fn new(
        player_store: Arc<dyn PlayerStore>,
        blind_alerter: Arc<dyn BlindAlerter>,
        blind_config: BlindConfig,
    ) -> Self {
        Self {
            player_store,
            blind_alerter,
            blind_config,
        }
    }

    /// Creates a fresh engine for one game, sharing this state's store and alerter
    pub fn new_game(&self) -> GameEngine {
        GameEngine::new(
            self.blind_alerter.clone(),
            self.player_store.clone(),
            self.blind_config.clone(),
        )
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown command {0:?}, expected \"play\" or \"serve\"")]
    UnknownCommand(String),
}
