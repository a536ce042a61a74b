//! Destinations for formatted report lines.
//!
//! The tracker never decides where its output goes. It hands every finished
//! line to a [`ReportSink`], so hosts can route reports into their own logging
//! setup without the library depending on a particular backend.
//!
//! ## Usage
//!
//! The default is [`TracingSink`], which emits each line as a `tracing` event
//! at `DEBUG` level under the `phase_tracker` target:
//!
//! ```rust
//! use std::sync::Arc;
//! use phase_tracker::{IndexPopulationPhase, LoggingPhaseTracker, TracingSink};
//!
//! let tracker: LoggingPhaseTracker<IndexPopulationPhase> =
//!     LoggingPhaseTracker::new(Arc::new(TracingSink), 600);
//! ```
//!
//! Any `Fn(&str)` closure is a sink too, which is handy for collecting lines:
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use phase_tracker::{IndexPopulationPhase, LoggingPhaseTracker};
//!
//! let lines = Arc::new(Mutex::new(Vec::new()));
//! let captured = Arc::clone(&lines);
//! let mut tracker = LoggingPhaseTracker::<IndexPopulationPhase>::new(
//!     Arc::new(move |line: &str| captured.lock().unwrap().push(line.to_string())),
//!     600,
//! );
//! tracker.stop().unwrap();
//! assert!(lines.lock().unwrap()[0].starts_with("TIME/PHASE Final: "));
//! ```

use tracing::debug;

/// Target used for every report line emitted through [`TracingSink`].
pub const REPORT_TARGET: &str = "phase_tracker";

/// Receiver for finished report lines.
///
/// Called synchronously from `enter_phase` and `stop`, so implementations
/// should return quickly. The `Send + Sync` bounds let a tracker move into a
/// [`SharedPhaseTracker`](crate::SharedPhaseTracker).
pub trait ReportSink: Send + Sync {
    fn report(&self, line: &str);
}

/// Emits report lines as `tracing` debug events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn report(&self, line: &str) {
        debug!(target: REPORT_TARGET, "{line}");
    }
}

/// Drops every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl ReportSink for NoOpSink {
    fn report(&self, _line: &str) {}
}

impl<F> ReportSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, line: &str) {
        self(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct SharedLogBuffer(Arc<Mutex<Vec<u8>>>);

    struct SharedLogWriter(Arc<Mutex<Vec<u8>>>);

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SharedLogBuffer {
        type Writer = SharedLogWriter;

        fn make_writer(&'a self) -> Self::Writer {
            SharedLogWriter(Arc::clone(&self.0))
        }
    }

    impl std::io::Write for SharedLogWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture_debug<F: FnOnce()>(f: F) -> String {
        let buffer = SharedLogBuffer(Arc::new(Mutex::new(Vec::new())));
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(buffer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_tracing_sink_emits_debug_event() {
        let output =
            capture_debug(|| TracingSink.report("TIME/PHASE Final: SCAN[nbrOfReports=0]"));
        assert!(output.contains("DEBUG"));
        assert!(output.contains(REPORT_TARGET));
        assert!(output.contains("TIME/PHASE Final: SCAN[nbrOfReports=0]"));
    }

    #[test]
    fn test_noop_sink_emits_nothing() {
        let output = capture_debug(|| NoOpSink.report("ignored"));
        assert!(output.is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&lines);
        let sink = move |line: &str| captured.lock().unwrap().push(line.to_string());
        sink.report("one");
        sink.report("two");
        assert_eq!(*lines.lock().unwrap(), vec!["one", "two"]);
    }
}
