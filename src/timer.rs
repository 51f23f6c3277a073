//! Scoped wall-clock timer
//!
//! A `Timer` starts when created and reports when dropped, so it covers
//! normal scope exit, early `?` returns and panics alike. The report is a
//! single line `"<name>: <duration>"` written to the timer's sink.
//!
//! ```
//! use ebbe::{Precision, TimerOptions};
//!
//! let mut out = Vec::new();
//! {
//!     let _timer = TimerOptions::named("load")
//!         .precision(Precision::Seconds)
//!         .start_with(&mut out);
//! }
//! assert!(String::from_utf8(out).unwrap().starts_with("load: "));
//! ```

use std::io::{self, Stderr, Write};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::format::{format_duration, Precision};

/// Timer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerOptions {
    /// Label prefixing the report line
    pub name: String,
    pub precision: Precision,
}

impl Default for TimerOptions {
    fn default() -> Self {
        Self {
            name: "Timer".to_string(),
            precision: Precision::default(),
        }
    }
}

impl TimerOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Start a timer reporting to stderr
    pub fn start(self) -> Timer<Stderr> {
        self.start_with(io::stderr())
    }

    /// Start a timer reporting to `sink`
    pub fn start_with<W: Write>(self, sink: W) -> Timer<W> {
        Timer {
            name: self.name,
            precision: self.precision,
            sink,
            start: Instant::now(),
        }
    }
}

/// Running timer; reports on drop
pub struct Timer<W: Write = Stderr> {
    name: String,
    precision: Precision,
    sink: W,
    start: Instant,
}

impl Timer<Stderr> {
    /// Start a nanosecond-precision timer reporting to stderr
    pub fn start(name: impl Into<String>) -> Self {
        TimerOptions::named(name).start()
    }
}

impl<W: Write> Timer<W> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time since the timer started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl<W: Write> Drop for Timer<W> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        debug!(
            timer = %self.name,
            elapsed_ms = elapsed.as_millis() as u64,
            "timer stopped"
        );

        let line = format!("{}: {}", self.name, format_duration(elapsed, self.precision));
        if let Err(e) = writeln!(self.sink, "{line}").and_then(|()| self.sink.flush()) {
            warn!(timer = %self.name, error = %e, "failed to write timer report");
        }
    }
}
