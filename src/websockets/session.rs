use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::sink::SocketSink;
use super::socket::{SocketError, SocketWrapper};
use crate::cli::{parse_player_count, parse_winner_name};
use crate::game::Game;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingPlayers,
    AwaitingWinner,
    Finished,
}

/// One game played over a socket.
///
/// The first text message is the number of players, the second the
/// winner's name. Blind alerts are pushed to the client as text frames
/// while the game runs. Invalid input is answered with an error message
/// and the client may try again.
pub struct GameSession<G> {
    socket: Box<dyn SocketWrapper>,
    game: G,
    alerts_to: Arc<SocketSink>,
    outbound_receiver: mpsc::UnboundedReceiver<String>,
    phase: Phase,
}

impl<G: Game> GameSession<G> {
    pub fn new(socket: Box<dyn SocketWrapper>, game: G) -> Self {
        let (sender, outbound_receiver) = mpsc::unbounded_channel();
        Self {
            socket,
            game,
            alerts_to: Arc::new(SocketSink::new(sender)),
            outbound_receiver,
            phase: Phase::AwaitingPlayers,
        }
    }

    /// Runs the session until the game is finished or the client leaves.
    /// Alerts still pending when the session ends are cancelled.
    pub async fn run(mut self) -> Result<(), SocketError> {
        let result = self.drive().await;

        self.game.abandon();
        let _ = self.socket.close().await;
        result
    }

    async fn drive(&mut self) -> Result<(), SocketError> {
        loop {
            tokio::select! {
                // Blind alerts from the game to the client
                Some(alert) = self.outbound_receiver.recv() => {
                    self.socket.send_message(alert).await?;
                }

                // Player count and winner from the client
                message = self.socket.receive_message() => {
                    match message? {
                        Some(text) => {
                            self.handle_message(&text).await?;
                            if self.phase == Phase::Finished {
                                self.flush_alerts().await?;
                                return Ok(());
                            }
                        }
                        None => {
                            debug!(phase = ?self.phase, "Client left before the game finished");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    async fn handle_message(&mut self, text: &str) -> Result<(), SocketError> {
        match self.phase {
            Phase::AwaitingPlayers => {
                let number_of_players = match parse_player_count(text) {
                    Ok(n) => n,
                    Err(e) => return self.reject(e.to_string()).await,
                };
                match self.game.start(number_of_players, self.alerts_to.clone()) {
                    Ok(()) => self.phase = Phase::AwaitingWinner,
                    Err(e) => return self.reject(e.to_string()).await,
                }
            }
            Phase::AwaitingWinner => {
                let winner = match parse_winner_name(text) {
                    Ok(winner) => winner,
                    Err(e) => return self.reject(e.to_string()).await,
                };
                match self.game.finish(&winner).await {
                    Ok(()) => {
                        info!(winner = %winner, "Game finished over socket");
                        self.phase = Phase::Finished;
                    }
                    Err(e) => return self.reject(e.to_string()).await,
                }
            }
            Phase::Finished => {}
        }
        Ok(())
    }

    async fn reject(&mut self, message: String) -> Result<(), SocketError> {
        warn!(phase = ?self.phase, error = %message, "Rejected socket message");
        self.socket.send_message(message).await
    }

    /// Sends alerts that fired before the game finished but were not yet delivered
    async fn flush_alerts(&mut self) -> Result<(), SocketError> {
        while let Ok(alert) = self.outbound_receiver.try_recv() {
            self.socket.send_message(alert).await?;
        }
        Ok(())
    }
}
