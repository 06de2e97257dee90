use async_trait::async_trait;
use std::sync::Arc;
use strum_macros::Display;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::{Game, GameError};
use crate::blinds::{AlertHandle, AlertSink, BlindAlerter, BlindConfig, BlindSchedule};
use crate::league::PlayerStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum GameState {
    NotStarted,
    Running,
    Finished,
}

/// Drives one game: schedules its blind alerts on start and records the
/// winner on finish. A new game needs a new engine.
pub struct GameEngine {
    id: Uuid,
    alerter: Arc<dyn BlindAlerter>,
    store: Arc<dyn PlayerStore>,
    config: BlindConfig,
    state: GameState,
    schedule: Option<BlindSchedule>,
    pending_alerts: Vec<AlertHandle>,
}

impl GameEngine {
    pub fn new(
        alerter: Arc<dyn BlindAlerter>,
        store: Arc<dyn PlayerStore>,
        config: BlindConfig,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            alerter,
            store,
            config,
            state: GameState::NotStarted,
            schedule: None,
            pending_alerts: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Schedule of the running game; `None` before start and after finish or abandon
    pub fn schedule(&self) -> Option<&BlindSchedule> {
        self.schedule.as_ref()
    }
}

#[async_trait]
impl Game for GameEngine {
    #[instrument(skip(self, alerts_to), fields(game_id = %self.id))]
    fn start(
        &mut self,
        number_of_players: i32,
        alerts_to: Arc<dyn AlertSink>,
    ) -> Result<(), GameError> {
        match self.state {
            GameState::NotStarted => {}
            GameState::Running => return Err(GameError::AlreadyStarted),
            GameState::Finished => return Err(GameError::AlreadyFinished),
        }

        let schedule = BlindSchedule::for_players(number_of_players, &self.config);
        if schedule.is_empty() {
            warn!(
                number_of_players = number_of_players,
                "No blind levels to schedule"
            );
        }

        self.pending_alerts = schedule
            .iter()
            .map(|level| {
                self.alerter
                    .schedule_alert_at(level.offset, level.amount, alerts_to.clone())
            })
            .collect();

        info!(
            number_of_players = number_of_players,
            alerts = self.pending_alerts.len(),
            "Game started"
        );

        self.schedule = Some(schedule);
        self.state = GameState::Running;
        Ok(())
    }

    #[instrument(skip(self), fields(game_id = %self.id))]
    async fn finish(&mut self, winner: &str) -> Result<(), GameError> {
        match self.state {
            GameState::Running => {}
            GameState::NotStarted => return Err(GameError::NotStarted),
            GameState::Finished => return Err(GameError::AlreadyFinished),
        }

        let winner = winner.trim();
        if winner.is_empty() {
            return Err(GameError::EmptyWinner);
        }

        // The game stays running if the win could not be recorded.
        self.store.record_win(winner).await?;

        self.schedule = None;
        self.state = GameState::Finished;
        info!(winner = %winner, "Game finished");
        Ok(())
    }

    #[instrument(skip(self), fields(game_id = %self.id))]
    fn abandon(&mut self) {
        let pending = self
            .pending_alerts
            .drain(..)
            .filter(|alert| !alert.is_finished())
            .inspect(AlertHandle::cancel)
            .count();

        self.schedule = None;
        debug!(cancelled_alerts = pending, "Game abandoned");
    }
}
