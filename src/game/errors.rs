use thiserror::Error;

use crate::league::StoreError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("Game has already started")]
    AlreadyStarted,

    #[error("Game has not started yet")]
    NotStarted,

    #[error("Game has already finished")]
    AlreadyFinished,

    #[error("Winner name cannot be empty")]
    EmptyWinner,

    #[error("Failed to record winner: {0}")]
    Store(#[from] StoreError),
}
