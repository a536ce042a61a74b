// src/lib.rs
pub use config::{DEFAULT_PERIOD_INTERVAL_SECS, PERIOD_INTERVAL_ENV, default_period_interval};
pub use error::PhaseTrackerError;
pub use phase::{IndexPopulationPhase, Phase};
pub use sink::{NoOpSink, ReportSink, TracingSink};
pub use stats::{DurationStats, PhaseStats, StatsSnapshot};
pub use timers::{Clock, ManualClock, MonotonicClock};
pub use tracker::{
    LoggingPhaseTracker, MESSAGE_PREFIX, NullPhaseTracker, PhaseSnapshot, PhaseTracker,
    SharedPhaseTracker, TrackerSnapshot,
};

mod config;
mod error;
pub mod format;
mod phase;
pub mod sink;
mod stats;
mod timers;
mod tracker;

#[cfg(test)]
mod tests;
