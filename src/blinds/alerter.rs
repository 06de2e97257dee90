use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::AlertSink;

/// Longest wait an alert is given; saturated schedule offsets are capped here.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Text written to a sink when the blind rises to `amount`
pub fn format_alert(amount: u32) -> String {
    format!("Blind is now {}\n", amount)
}

/// Handle to one pending alert. Cancelling an alert that already fired is a no-op.
#[derive(Debug, Clone, Default)]
pub struct AlertHandle {
    abort: Option<AbortHandle>,
}

impl AlertHandle {
    pub fn new(abort: AbortHandle) -> Self {
        Self { abort: Some(abort) }
    }

    /// A handle with nothing behind it, for alerters that do not spawn tasks
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        if let Some(abort) = &self.abort {
            abort.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.abort.as_ref().map_or(true, AbortHandle::is_finished)
    }
}

/// Arranges for blind alerts to be written to a sink once they are due.
pub trait BlindAlerter: Send + Sync {
    /// Registers one alert for `amount`, written to `sink` after `offset`.
    /// Returns immediately; delivery happens in the background.
    fn schedule_alert_at(
        &self,
        offset: Duration,
        amount: u32,
        sink: Arc<dyn AlertSink>,
    ) -> AlertHandle;
}

/// Alerter that spawns one sleeping tokio task per alert.
///
/// Each alert's deadline is fixed when it is scheduled, so alerts scheduled
/// together share one starting instant. Outside a tokio runtime nothing is
/// scheduled and a detached handle is returned. Pending alerts are dropped
/// with the runtime, so they never hold up process exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioBlindAlerter;

impl TokioBlindAlerter {
    pub fn new() -> Self {
        Self
    }
}

impl BlindAlerter for TokioBlindAlerter {
    fn schedule_alert_at(
        &self,
        offset: Duration,
        amount: u32,
        sink: Arc<dyn AlertSink>,
    ) -> AlertHandle {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!(amount = amount, error = %e, "No runtime to schedule blind alert on");
                return AlertHandle::detached();
            }
        };

        let deadline = Instant::now() + offset.min(FAR_FUTURE);
        debug!(amount = amount, offset = ?offset, "Scheduling blind alert");

        let task = runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;

            // Delivery failures stay local to this alert.
            match sink.write_alert(&format_alert(amount)).await {
                Ok(()) => debug!(amount = amount, "Blind alert delivered"),
                Err(e) => warn!(amount = amount, error = %e, "Failed to deliver blind alert"),
            }
        });

        AlertHandle::new(task.abort_handle())
    }
}
