// Blind escalation: computing the schedule and delivering timed alerts
// to whatever sink the caller hands in.

pub use alerter::{format_alert, AlertHandle, BlindAlerter, TokioBlindAlerter};
pub use schedule::{BlindConfig, BlindLevel, BlindSchedule, BLIND_AMOUNTS, DEFAULT_BASE_MINUTES};
pub use sink::{AlertSink, DiscardSink, SinkError, TerminalSink, WriterSink};

mod alerter;
mod schedule;
mod sink;
