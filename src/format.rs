//! Human-readable durations

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Finest unit kept when formatting a duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
    Microseconds,
    #[default]
    Nanoseconds,
}

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Coarsest first
const UNITS: [(Precision, u128, &str); 7] = [
    (Precision::Days, 86_400 * NANOS_PER_SECOND, "day"),
    (Precision::Hours, 3_600 * NANOS_PER_SECOND, "hour"),
    (Precision::Minutes, 60 * NANOS_PER_SECOND, "minute"),
    (Precision::Seconds, NANOS_PER_SECOND, "second"),
    (Precision::Milliseconds, 1_000_000, "millisecond"),
    (Precision::Microseconds, 1_000, "microsecond"),
    (Precision::Nanoseconds, 1, "nanosecond"),
];

impl Precision {
    /// Singular unit name
    pub fn unit(&self) -> &'static str {
        UNITS
            .iter()
            .find(|(precision, _, _)| precision == self)
            .map(|(_, _, name)| *name)
            .unwrap_or("nanosecond")
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.unit())
    }
}

impl FromStr for Precision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let singular = wanted.strip_suffix('s').unwrap_or(&wanted);
        UNITS
            .iter()
            .find(|(_, _, name)| *name == singular)
            .map(|(precision, _, _)| *precision)
            .ok_or_else(|| format!("unknown precision '{s}' (expected e.g. seconds, milliseconds)"))
    }
}

/// Render `duration` as `"1 minute, 2 seconds, 3 milliseconds"`, keeping
/// units down to `precision` and skipping zero units.
pub fn format_duration(duration: Duration, precision: Precision) -> String {
    let mut remaining = duration.as_nanos();
    let mut parts = Vec::new();

    for (unit, size, name) in UNITS {
        let count = remaining / size;
        remaining %= size;

        if count > 0 {
            let plural = if count == 1 { "" } else { "s" };
            parts.push(format!("{count} {name}{plural}"));
        }
        if unit == precision {
            break;
        }
    }

    if parts.is_empty() {
        return format!("0 {precision}");
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_down_units() {
        let d = Duration::from_millis(62_003);
        assert_eq!(
            format_duration(d, Precision::Milliseconds),
            "1 minute, 2 seconds, 3 milliseconds"
        );
        assert_eq!(format_duration(d, Precision::Seconds), "1 minute, 2 seconds");
        assert_eq!(format_duration(d, Precision::Minutes), "1 minute");
    }

    #[test]
    fn pluralizes() {
        let d = Duration::from_secs(2 * 86_400 + 3_600);
        assert_eq!(format_duration(d, Precision::Hours), "2 days, 1 hour");
    }

    #[test]
    fn nanosecond_precision() {
        let d = Duration::new(1, 2_003);
        assert_eq!(
            format_duration(d, Precision::Nanoseconds),
            "1 second, 2 microseconds, 3 nanoseconds"
        );
    }

    #[test]
    fn below_precision_is_zero() {
        assert_eq!(
            format_duration(Duration::from_micros(999), Precision::Milliseconds),
            "0 milliseconds"
        );
        assert_eq!(format_duration(Duration::ZERO, Precision::Nanoseconds), "0 nanoseconds");
    }

    #[test]
    fn parses_unit_names() {
        assert_eq!("milliseconds".parse::<Precision>(), Ok(Precision::Milliseconds));
        assert_eq!("Second".parse::<Precision>(), Ok(Precision::Seconds));
        assert!("fortnights".parse::<Precision>().is_err());
        assert_eq!(Precision::Microseconds.to_string(), "microseconds");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let precision: Precision = serde_json::from_str("\"seconds\"").unwrap();
        assert_eq!(precision, Precision::Seconds);
    }
}
