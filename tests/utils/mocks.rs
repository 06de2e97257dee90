#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use poker::{
    blinds::{AlertHandle, SinkError},
    websockets::{SocketError, SocketWrapper},
    AlertSink, BlindAlerter, Game, GameError, League, PlayerStore, StoreError,
};

// ============================================================================
// Alerts
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAlert {
    pub at: Duration,
    pub amount: u32,
}

/// Records every alert it is asked to schedule without firing any
#[derive(Default)]
pub struct SpyBlindAlerter {
    alerts: Mutex<Vec<ScheduledAlert>>,
}

impl SpyBlindAlerter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<ScheduledAlert> {
        self.alerts.lock().unwrap().clone()
    }
}

impl BlindAlerter for SpyBlindAlerter {
    fn schedule_alert_at(
        &self,
        offset: Duration,
        amount: u32,
        _sink: Arc<dyn AlertSink>,
    ) -> AlertHandle {
        self.alerts.lock().unwrap().push(ScheduledAlert {
            at: offset,
            amount,
        });
        AlertHandle::detached()
    }
}

/// Sink that keeps every alert written to it
#[derive(Default)]
pub struct RecordingSink {
    alerts: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertSink for RecordingSink {
    async fn write_alert(&self, alert: &str) -> Result<(), SinkError> {
        self.alerts.lock().unwrap().push(alert.to_string());
        Ok(())
    }
}

// ============================================================================
// Persistence
// ============================================================================

/// Store whose writes always fail, as if the disk were full
pub struct FailingPlayerStore;

#[async_trait]
impl PlayerStore for FailingPlayerStore {
    async fn record_win(&self, _name: &str) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "no space left on device",
        )))
    }

    async fn get_player_score(&self, _name: &str) -> Result<u32, StoreError> {
        Ok(0)
    }

    async fn get_league(&self) -> Result<League, StoreError> {
        Ok(League::default())
    }
}

// ============================================================================
// Game
// ============================================================================

#[derive(Debug, Default)]
pub struct GameSpyRecord {
    pub start_called: bool,
    pub started_with: Option<i32>,
    pub finish_called: bool,
    pub finished_with: Option<String>,
    pub abandoned: bool,
}

/// Game double recording how the driver called it
#[derive(Clone, Default)]
pub struct GameSpy {
    record: Arc<Mutex<GameSpyRecord>>,
    fail_finish: bool,
}

impl GameSpy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_finish() -> Self {
        Self {
            fail_finish: true,
            ..Self::default()
        }
    }

    pub fn start_called(&self) -> bool {
        self.record.lock().unwrap().start_called
    }

    pub fn started_with(&self) -> Option<i32> {
        self.record.lock().unwrap().started_with
    }

    pub fn finish_called(&self) -> bool {
        self.record.lock().unwrap().finish_called
    }

    pub fn finished_with(&self) -> Option<String> {
        self.record.lock().unwrap().finished_with.clone()
    }

    pub fn abandoned(&self) -> bool {
        self.record.lock().unwrap().abandoned
    }
}

#[async_trait]
impl Game for GameSpy {
    fn start(
        &mut self,
        number_of_players: i32,
        _alerts_to: Arc<dyn AlertSink>,
    ) -> Result<(), GameError> {
        let mut record = self.record.lock().unwrap();
        record.start_called = true;
        record.started_with = Some(number_of_players);
        Ok(())
    }

    async fn finish(&mut self, winner: &str) -> Result<(), GameError> {
        let mut record = self.record.lock().unwrap();
        record.finish_called = true;
        record.finished_with = Some(winner.to_string());
        if self.fail_finish {
            return Err(GameError::Store(StoreError::Database(
                "connection refused".to_string(),
            )));
        }
        Ok(())
    }

    fn abandon(&mut self) {
        self.record.lock().unwrap().abandoned = true;
    }
}

// ============================================================================
// Sockets
// ============================================================================

/// In-process stand-in for a client connection.
///
/// Messages pushed through the paired sender arrive as client messages;
/// dropping that sender looks like the client disconnecting.
pub struct FakeSocket {
    incoming: mpsc::UnboundedReceiver<String>,
    sent: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

#[derive(Clone)]
pub struct FakeClient {
    sender: mpsc::UnboundedSender<String>,
    sent: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

impl FakeSocket {
    pub fn pair() -> (FakeSocket, FakeClient) {
        let (sender, incoming) = mpsc::unbounded_channel();
        let sent = Arc::new(Mutex::new(Vec::new()));
        let closed = Arc::new(AtomicBool::new(false));
        (
            FakeSocket {
                incoming,
                sent: sent.clone(),
                closed: closed.clone(),
            },
            FakeClient {
                sender,
                sent,
                closed,
            },
        )
    }
}

impl FakeClient {
    pub fn send(&self, message: &str) {
        self.sender.send(message.to_string()).unwrap();
    }

    pub fn received(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Waits until the server has sent `message`, giving up after a second
    pub async fn wait_for(&self, message: &str) -> bool {
        for _ in 0..100 {
            if self.received().iter().any(|m| m == message) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }
}

#[async_trait]
impl SocketWrapper for FakeSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(SocketError::ConnectionClosed);
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }

    async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
        Ok(self.incoming.recv().await)
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
