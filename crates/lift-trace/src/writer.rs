//! `TraceWriter<W>`: bridges `SimObserver` to an `io::Write`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use lift_sim::{SimObserver, SimStats, StepRecord};

use crate::{TraceError, TraceResult};

/// A [`SimObserver`] that prints every [`StepRecord`] on its own line.
///
/// Errors from the sink are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].  Once a write has failed, later records
/// are dropped.
pub struct TraceWriter<W: Write> {
    out:        W,
    lines:      u64,
    last_error: Option<TraceError>,
}

impl TraceWriter<BufWriter<File>> {
    /// Create (or truncate) `path` and trace into it.
    pub fn create(path: &Path) -> TraceResult<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0, last_error: None }
    }

    /// Lines written so far, summary included.
    pub fn lines_written(&self) -> u64 {
        self.lines
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<TraceError> {
        self.last_error.take()
    }

    /// Unwrap the inner sink (e.g. to inspect a buffer after the sim).
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &dyn std::fmt::Display) {
        if self.last_error.is_some() {
            return;
        }
        match writeln!(self.out, "{text}") {
            Ok(()) => self.lines += 1,
            Err(e) => self.last_error = Some(e.into()),
        }
    }
}

impl<W: Write> SimObserver for TraceWriter<W> {
    fn on_step(&mut self, record: &StepRecord) {
        self.line(record);
    }

    fn on_sim_end(&mut self, stats: &SimStats) {
        self.line(&summary_line(stats));
        if self.last_error.is_none() {
            if let Err(e) = self.out.flush() {
                self.last_error = Some(e.into());
            }
        }
    }
}

/// The closing line written after the last step.
pub fn summary_line(stats: &SimStats) -> String {
    let mean = |m: Option<f64>| m.map_or_else(|| "-".to_owned(), |v| format!("{v:.1}"));
    format!(
        "{}  end  events {}  served {}  abandoned {}  dropped {}  wait {}  ride {}",
        stats.final_time,
        stats.events_dispatched,
        stats.served,
        stats.abandoned,
        stats.dropped,
        mean(stats.mean_wait()),
        mean(stats.mean_ride()),
    )
}

