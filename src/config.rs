//! Process-wide default for the periodic report interval.
//!
//! The default is 600 seconds and may be overridden once per process through
//! the `PHASE_TRACKER_PERIOD_INTERVAL` environment variable (integer seconds).
//! The variable is read the first time a tracker asks for the default.

use once_cell::sync::Lazy;
use tracing::warn;

pub const DEFAULT_PERIOD_INTERVAL_SECS: u64 = 600;

pub const PERIOD_INTERVAL_ENV: &str = "PHASE_TRACKER_PERIOD_INTERVAL";

static PERIOD_INTERVAL: Lazy<u64> =
    Lazy::new(|| parse_period_interval(std::env::var(PERIOD_INTERVAL_ENV).ok().as_deref()));

/// The configured default period interval in seconds.
pub fn default_period_interval() -> u64 {
    *PERIOD_INTERVAL
}

fn parse_period_interval(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return DEFAULT_PERIOD_INTERVAL_SECS;
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) => secs,
        Err(e) => {
            warn!(
                variable = PERIOD_INTERVAL_ENV,
                value = raw,
                error = %e,
                default = DEFAULT_PERIOD_INTERVAL_SECS,
                "Ignoring invalid period interval override"
            );
            DEFAULT_PERIOD_INTERVAL_SECS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        unset = { None, 600 },
        override_value = { Some("30"), 30 },
        surrounding_whitespace = { Some(" 45 "), 45 },
        zero = { Some("0"), 0 },
        not_a_number = { Some("ten"), 600 },
        negative = { Some("-5"), 600 },
        empty = { Some(""), 600 },
    )]
    fn test_parse_period_interval(raw: Option<&str>, expected: u64) {
        assert_eq!(parse_period_interval(raw), expected);
    }
}
