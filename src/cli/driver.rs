use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, instrument, warn};

use super::parser::{parse_player_count, parse_winner, InputError};
use crate::blinds::AlertSink;
use crate::game::Game;
use crate::shared::AppError;

pub const PLAYER_PROMPT: &str = "Please enter the number of players: ";

/// Line-oriented driver for a single game played at a terminal.
///
/// Prompts and input errors go to `output`; blind alerts go to `alerts_to`.
pub struct Cli<R, W, G> {
    input: R,
    output: W,
    game: G,
    alerts_to: Arc<dyn AlertSink>,
}

impl<R, W, G> Cli<R, W, G>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
    G: Game,
{
    pub fn new(input: R, output: W, game: G, alerts_to: Arc<dyn AlertSink>) -> Self {
        Self {
            input,
            output,
            game,
            alerts_to,
        }
    }

    /// Plays one game: reads the player count, starts the game, then reads
    /// the winner and finishes it.
    ///
    /// Bad input ends the session with a message and `Ok(())`. A game that
    /// cannot be finished, e.g. because the win was not recorded, is an error.
    #[instrument(skip(self))]
    pub async fn play_poker(&mut self) -> Result<(), AppError> {
        self.output.write_all(PLAYER_PROMPT.as_bytes()).await?;
        self.output.flush().await?;

        let line = self.read_line().await?;
        let number_of_players = match parse_player_count(&line) {
            Ok(n) => n,
            Err(e) => return self.reject(e).await,
        };

        self.game.start(number_of_players, self.alerts_to.clone())?;

        let line = self.read_line().await?;
        let winner = match parse_winner(&line) {
            Ok(winner) => winner,
            Err(e) => return self.reject(e).await,
        };

        self.game.finish(&winner).await?;
        info!(winner = %winner, "Game recorded");
        Ok(())
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    async fn read_line(&mut self) -> Result<String, AppError> {
        let mut line = String::new();
        self.input.read_line(&mut line).await?;
        Ok(line)
    }

    async fn reject(&mut self, error: InputError) -> Result<(), AppError> {
        warn!(error = %error, "Rejected input");
        self.output.write_all(format!("{}\n", error).as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}
