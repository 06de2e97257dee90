use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::blinds::{AlertSink, SinkError};

/// Alert sink feeding a socket connection's outbound queue.
///
/// Each alert becomes one text frame. Once the connection has gone away
/// the channel is closed and writes fail with `SinkError::Closed`.
#[derive(Debug, Clone)]
pub struct SocketSink {
    sender: mpsc::UnboundedSender<String>,
}

impl SocketSink {
    pub fn new(sender: mpsc::UnboundedSender<String>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl AlertSink for SocketSink {
    async fn write_alert(&self, alert: &str) -> Result<(), SinkError> {
        self.sender
            .send(alert.to_string())
            .map_err(|_| SinkError::Closed)
    }
}
