use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink is closed")]
    Closed,

    #[error("Sink write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for blind alerts: a terminal, a log file, a live socket.
///
/// Each call carries one complete alert line and must be delivered as a
/// single write so alerts fired from different tasks never interleave.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn write_alert(&self, alert: &str) -> Result<(), SinkError>;
}

/// Sink over any async writer. The mutex keeps each alert's bytes together.
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W> WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W> AlertSink for WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn write_alert(&self, alert: &str) -> Result<(), SinkError> {
        let mut writer = self.writer.lock().await;
        writer.write_all(alert.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }
}

pub type TerminalSink = WriterSink<tokio::io::Stdout>;

impl TerminalSink {
    pub fn stdout() -> Self {
        WriterSink::new(tokio::io::stdout())
    }
}

/// Accepts and drops every alert
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

#[async_trait]
impl AlertSink for DiscardSink {
    async fn write_alert(&self, _alert: &str) -> Result<(), SinkError> {
        Ok(())
    }
}
