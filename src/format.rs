//! Human-readable rendering of durations for report lines.

use std::time::Duration;

const UNITS: [(u128, &str); 6] = [
    (86_400_000_000_000, "d"),
    (3_600_000_000_000, "h"),
    (60_000_000_000, "m"),
    (1_000_000_000, "s"),
    (1_000_000, "ms"),
    (1_000, "μs"),
];

/// Render a duration as a compact unit string, largest unit first.
///
/// Zero-valued units are skipped, so `1h0m2s` renders as `1h2s`. A zero
/// duration renders as `0ns`.
pub fn nanos_to_string(duration: Duration) -> String {
    let mut remaining = duration.as_nanos();
    let mut out = String::new();
    for (unit, suffix) in UNITS {
        let count = remaining / unit;
        if count > 0 {
            remaining -= count * unit;
            out.push_str(&count.to_string());
            out.push_str(suffix);
        }
    }
    if remaining > 0 || out.is_empty() {
        out.push_str(&remaining.to_string());
        out.push_str("ns");
    }
    out
}

/// Drop everything below millisecond resolution.
pub fn truncate_to_millis(duration: Duration) -> Duration {
    Duration::from_millis(duration.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        zero = { Duration::ZERO, "0ns" },
        nanos = { Duration::from_nanos(17), "17ns" },
        micros_and_nanos = { Duration::from_nanos(1_250), "1μs250ns" },
        millis = { Duration::from_millis(250), "250ms" },
        seconds_and_millis = { Duration::from_millis(1_500), "1s500ms" },
        skips_zero_units = { Duration::from_secs(3_602), "1h2s" },
        days = { Duration::from_secs(90_061), "1d1h1m1s" },
    )]
    fn test_nanos_to_string(duration: Duration, expected: &str) {
        assert_eq!(nanos_to_string(duration), expected);
    }

    #[test]
    fn test_truncate_to_millis() {
        assert_eq!(
            truncate_to_millis(Duration::from_nanos(1_999_999)),
            Duration::from_millis(1)
        );
        assert_eq!(truncate_to_millis(Duration::from_nanos(999_999)), Duration::ZERO);
    }
}
