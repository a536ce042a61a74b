//! Shared fixtures for unit tests and end-to-end tracker scenarios.

use std::sync::Mutex;

use strum_macros::{Display, EnumIter};

use crate::sink::ReportSink;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub(crate) enum TestPhase {
    A,
    B,
    C,
}

/// Sink that keeps every reported line in memory.
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    lines: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub(crate) fn count_starting_with(&self, prefix: &str) -> usize {
        self.lines().iter().filter(|l| l.starts_with(prefix)).count()
    }
}

impl ReportSink for RecordingSink {
    fn report(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}
