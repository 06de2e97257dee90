// Public API
pub use engine::{GameEngine, GameState};
pub use errors::GameError;

use async_trait::async_trait;
use std::sync::Arc;

use crate::blinds::AlertSink;

// Internal modules
mod engine;
mod errors;

/// Lifecycle of one poker game, as seen by whatever drives it.
#[async_trait]
pub trait Game: Send {
    /// Starts the game, scheduling blind alerts to `alerts_to`.
    fn start(
        &mut self,
        number_of_players: i32,
        alerts_to: Arc<dyn AlertSink>,
    ) -> Result<(), GameError>;

    /// Ends the game and records the winner.
    async fn finish(&mut self, winner: &str) -> Result<(), GameError>;

    /// Drops any alerts still pending for this game.
    fn abandon(&mut self);
}
