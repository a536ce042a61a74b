//! Phase transition bookkeeping and report emission.
//!
//! A [`LoggingPhaseTracker`] is told which phase the host has entered and
//! attributes the wall time between two transitions to the phase being left.
//! Reporting is opportunistic: on every real transition the tracker checks
//! how long ago it last reported, and if the configured interval has passed
//! it emits a combined cumulative and windowed report. There is no background
//! timer, so a host that stops announcing phases stops getting reports.
//!
//! ```rust
//! use std::sync::Arc;
//! use phase_tracker::{IndexPopulationPhase, LoggingPhaseTracker, TracingSink};
//!
//! let mut tracker = LoggingPhaseTracker::new(Arc::new(TracingSink), 600);
//! tracker.enter_phase(IndexPopulationPhase::Scan).unwrap();
//! tracker.enter_phase(IndexPopulationPhase::Write).unwrap();
//! tracker.stop().unwrap();
//!
//! let scan = tracker.stats(IndexPopulationPhase::Scan).unwrap();
//! assert_eq!(scan.cumulative().report_count(), 1);
//! assert!(tracker.enter_phase(IndexPopulationPhase::Merge).is_err());
//! ```

use std::sync::{Arc, Mutex};
use std::time::Instant;

use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::default_period_interval;
use crate::error::PhaseTrackerError;
use crate::phase::Phase;
use crate::sink::ReportSink;
use crate::stats::{PhaseStats, StatsSnapshot};
use crate::timers::{Clock, MonotonicClock};

/// Prefix of every emitted report line.
pub const MESSAGE_PREFIX: &str = "TIME/PHASE ";

/// Receives phase transitions from a host pipeline.
pub trait PhaseTracker<P: Phase> {
    /// Announce that the host is now in `phase`.
    ///
    /// Re-announcing the phase the host is already in does nothing.
    fn enter_phase(&mut self, phase: P) -> Result<(), PhaseTrackerError>;

    /// Close the active phase and stop tracking for good.
    fn stop(&mut self) -> Result<(), PhaseTrackerError>;
}

/// A tracker that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPhaseTracker;

impl<P: Phase> PhaseTracker<P> for NullPhaseTracker {
    fn enter_phase(&mut self, _phase: P) -> Result<(), PhaseTrackerError> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PhaseTrackerError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackerState<P> {
    Idle,
    InPhase { phase: P, entered_at: Instant },
    Stopped,
}

/// Accumulates time per phase and reports it through a [`ReportSink`].
///
/// Driven by a single thread of control; wrap it in a
/// [`SharedPhaseTracker`] when several threads announce transitions.
pub struct LoggingPhaseTracker<P: Phase> {
    entries: Vec<(P, PhaseStats)>,
    state: TrackerState<P>,
    last_period_report: Option<Instant>,
    period_interval: u64,
    sink: Arc<dyn ReportSink>,
    clock: Arc<dyn Clock>,
}

impl<P: Phase> LoggingPhaseTracker<P> {
    /// Create a tracker that reports at most every `period_interval` seconds.
    pub fn new(sink: Arc<dyn ReportSink>, period_interval: u64) -> Self {
        Self::with_clock(sink, period_interval, Arc::new(MonotonicClock))
    }

    /// Create a tracker using the process-wide default interval.
    pub fn with_default_interval(sink: Arc<dyn ReportSink>) -> Self {
        Self::new(sink, default_period_interval())
    }

    /// Create a tracker that reads time from `clock` instead of [`MonotonicClock`].
    pub fn with_clock(
        sink: Arc<dyn ReportSink>,
        period_interval: u64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            entries: P::iter().map(|phase| (phase, PhaseStats::new())).collect(),
            state: TrackerState::Idle,
            last_period_report: None,
            period_interval,
            sink,
            clock,
        }
    }

    pub fn enter_phase(&mut self, phase: P) -> Result<(), PhaseTrackerError> {
        match self.state {
            TrackerState::Stopped => {
                warn!(
                    event = "PhaseTransition",
                    phase = %phase,
                    "Phase reported after tracker was stopped"
                );
                return Err(PhaseTrackerError::Stopped);
            }
            TrackerState::InPhase { phase: current, .. } if current == phase => return Ok(()),
            _ => {}
        }

        let now = self.clock.now();
        self.close_current_phase(now);
        trace!(event = "PhaseTransition", phase = %phase);
        self.state = TrackerState::InPhase {
            phase,
            entered_at: now,
        };

        let last_report = *self.last_period_report.get_or_insert(now);
        let secs_since_report = now.saturating_duration_since(last_report).as_secs();
        if secs_since_report >= self.period_interval {
            self.period_report(secs_since_report);
            self.last_period_report = Some(now);
        }
        Ok(())
    }

    /// Close the active phase and emit the final report.
    ///
    /// A second call is a no-op.
    pub fn stop(&mut self) -> Result<(), PhaseTrackerError> {
        if self.state == TrackerState::Stopped {
            debug!(event = "Stop", "Phase tracker already stopped");
            return Ok(());
        }
        let now = self.clock.now();
        self.close_current_phase(now);
        self.state = TrackerState::Stopped;
        self.final_report();
        Ok(())
    }

    pub fn current_phase(&self) -> Option<P> {
        match self.state {
            TrackerState::InPhase { phase, .. } => Some(phase),
            _ => None,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.state == TrackerState::Stopped
    }

    pub fn period_interval(&self) -> u64 {
        self.period_interval
    }

    pub fn stats(&self, phase: P) -> Option<&PhaseStats> {
        self.entries
            .iter()
            .find(|(p, _)| *p == phase)
            .map(|(_, stats)| stats)
    }

    /// Per-phase statistics in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (P, &PhaseStats)> {
        self.entries.iter().map(|(phase, stats)| (*phase, stats))
    }

    /// Cumulative figures for every phase, e.g. `Total: SCAN[...], WRITE[...]`.
    pub fn cumulative_report(&self, title: &str) -> String {
        let phases = self
            .entries
            .iter()
            .map(|(phase, stats)| format!("{}[{}]", phase, stats.cumulative()))
            .join(", ");
        format!("{title}: {phases}")
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            current_phase: self.current_phase().map(|p| p.to_string()),
            stopped: self.is_stopped(),
            phases: self
                .entries
                .iter()
                .map(|(phase, stats)| PhaseSnapshot {
                    phase: phase.to_string(),
                    cumulative: stats.cumulative().snapshot(),
                    windowed: stats.windowed().snapshot(),
                })
                .collect(),
        }
    }

    fn close_current_phase(&mut self, now: Instant) {
        let TrackerState::InPhase { phase, entered_at } = self.state else {
            return;
        };
        let elapsed = now.saturating_duration_since(entered_at);
        if let Some((_, stats)) = self.entries.iter_mut().find(|(p, _)| *p == phase) {
            stats.log(elapsed);
        }
    }

    fn period_report(&mut self, secs_since_report: u64) {
        let total = self.cumulative_report("Total");
        let window = self
            .entries
            .iter()
            .map(|(phase, stats)| format!("{}[{}]", phase, stats.windowed()))
            .join(", ");
        for (_, stats) in self.entries.iter_mut() {
            stats.reset_window();
        }
        self.sink.report(&format!(
            "{MESSAGE_PREFIX}{total}, Last {secs_since_report} sec: {window}"
        ));
    }

    fn final_report(&self) {
        self.sink
            .report(&format!("{MESSAGE_PREFIX}{}", self.cumulative_report("Final")));
    }
}

impl<P: Phase> PhaseTracker<P> for LoggingPhaseTracker<P> {
    fn enter_phase(&mut self, phase: P) -> Result<(), PhaseTrackerError> {
        LoggingPhaseTracker::enter_phase(self, phase)
    }

    fn stop(&mut self) -> Result<(), PhaseTrackerError> {
        LoggingPhaseTracker::stop(self)
    }
}

/// A cloneable handle that serializes every call on one lock.
pub struct SharedPhaseTracker<P: Phase> {
    inner: Arc<Mutex<LoggingPhaseTracker<P>>>,
}

impl<P: Phase> Clone for SharedPhaseTracker<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Phase> SharedPhaseTracker<P> {
    pub fn new(tracker: LoggingPhaseTracker<P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    pub fn enter_phase(&self, phase: P) -> Result<(), PhaseTrackerError> {
        self.inner.lock()?.enter_phase(phase)
    }

    pub fn stop(&self) -> Result<(), PhaseTrackerError> {
        self.inner.lock()?.stop()
    }

    pub fn snapshot(&self) -> Result<TrackerSnapshot, PhaseTrackerError> {
        Ok(self.inner.lock()?.snapshot())
    }
}

impl<P: Phase> PhaseTracker<P> for SharedPhaseTracker<P> {
    fn enter_phase(&mut self, phase: P) -> Result<(), PhaseTrackerError> {
        SharedPhaseTracker::enter_phase(self, phase)
    }

    fn stop(&mut self) -> Result<(), PhaseTrackerError> {
        SharedPhaseTracker::stop(self)
    }
}

/// Serializable view of a tracker's statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerSnapshot {
    pub current_phase: Option<String>,
    pub stopped: bool,
    pub phases: Vec<PhaseSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseSnapshot {
    pub phase: String,
    pub cumulative: StatsSnapshot,
    pub windowed: StatsSnapshot,
}
