//! Per-phase duration statistics.
//!
//! [`DurationStats`] is the accumulator for one stream of durations and
//! [`PhaseStats`] pairs a lifetime accumulator with one that is emptied after
//! every periodic report.

use std::fmt;
use std::time::Duration;

use itertools::Itertools;
use serde::Serialize;

use crate::format::{nanos_to_string, truncate_to_millis};

/// Total, count and extrema over every duration logged since the last reset.
///
/// Extrema are `None` until the first duration arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationStats {
    total_time: Duration,
    report_count: u64,
    min_time: Option<Duration>,
    max_time: Option<Duration>,
}

impl DurationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, duration: Duration) {
        self.report_count += 1;
        self.total_time += duration;
        self.max_time = Some(self.max_time.map_or(duration, |max| max.max(duration)));
        self.min_time = Some(self.min_time.map_or(duration, |min| min.min(duration)));
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    pub fn report_count(&self) -> u64 {
        self.report_count
    }

    pub fn min_time(&self) -> Option<Duration> {
        self.min_time
    }

    pub fn max_time(&self) -> Option<Duration> {
        self.max_time
    }

    /// Floor of `total_time / report_count`, or `None` if nothing was logged.
    pub fn average(&self) -> Option<Duration> {
        if self.report_count == 0 {
            return None;
        }
        let avg = self.total_time.as_nanos() / u128::from(self.report_count);
        Some(Duration::from_nanos(avg as u64))
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let millis = |d: Duration| d.as_millis() as u64;
        StatsSnapshot {
            total_time_ms: millis(self.total_time),
            avg_time_ms: self.average().map(millis),
            min_time_ms: self.min_time.map(millis),
            max_time_ms: self.max_time.map(millis),
            nbr_of_reports: self.report_count,
        }
    }
}

fn time_field(name: &str, value: Duration) -> String {
    format!("{}={}", name, nanos_to_string(truncate_to_millis(value)))
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(avg), Some(min), Some(max)) = (self.average(), self.min_time, self.max_time)
        else {
            return write!(f, "nbrOfReports={}", self.report_count);
        };
        let fields = [
            time_field("totalTime", self.total_time),
            time_field("avgTime", avg),
            time_field("minTime", min),
            time_field("maxTime", max),
            format!("nbrOfReports={}", self.report_count),
        ];
        write!(f, "{}", fields.iter().join(", "))
    }
}

/// Cumulative and windowed statistics for a single phase.
#[derive(Debug, Clone, Default)]
pub struct PhaseStats {
    cumulative: DurationStats,
    windowed: DurationStats,
}

impl PhaseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one visit to the phase in both views.
    pub fn log(&mut self, duration: Duration) {
        self.cumulative.log(duration);
        self.windowed.log(duration);
    }

    pub fn cumulative(&self) -> &DurationStats {
        &self.cumulative
    }

    pub fn windowed(&self) -> &DurationStats {
        &self.windowed
    }

    pub(crate) fn reset_window(&mut self) {
        self.windowed.reset();
    }
}

/// Serializable view of a [`DurationStats`], in whole milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub total_time_ms: u64,
    pub avg_time_ms: Option<u64>,
    pub min_time_ms: Option<u64>,
    pub max_time_ms: Option<u64>,
    pub nbr_of_reports: u64,
}
