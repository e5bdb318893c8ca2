//! Run metrics collection and reporting.
//!
//! [`RunMetrics`] is a cheap, cloneable handle that a [`Harness`] fills in
//! while it runs: records read from the input, records emitted to the
//! output, key groups reduced, and wall-clock run duration. Metrics can be
//! printed to stdout or saved to a JSON file after the run.
//!
//! # Example
//!
//! ```no_run
//! use localmr::{Harness, RunMetrics};
//! use localmr::testing::identity_reducer;
//!
//! # fn main() -> anyhow::Result<()> {
//! let metrics = RunMetrics::new();
//! let harness = Harness::new().with_metrics(metrics.clone());
//!
//! let mut out = Vec::new();
//! harness.reduce("a\t1\na\t2\nb\t3".as_bytes(), &mut out, identity_reducer())?;
//!
//! metrics.print();
//! metrics.save_to_file("metrics.json")?;
//! # Ok(())
//! # }
//! ```
//!
//! [`Harness`]: crate::Harness

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Shared counters for one or more harness runs.
///
/// Counters accumulate across runs sharing the handle; timings reflect the
/// most recent run. A run that aborts with an error leaves whatever was
/// recorded up to the failure.
#[derive(Clone, Default)]
pub struct RunMetrics {
    inner: Arc<RunMetricsInner>,
}

#[derive(Default)]
struct RunMetricsInner {
    records_read: AtomicU64,
    records_emitted: AtomicU64,
    key_groups: AtomicU64,
    timing: Mutex<Timing>,
}

#[derive(Default)]
struct Timing {
    start: Option<Instant>,
    end: Option<Instant>,
}

impl RunMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records decoded from the input stream.
    #[must_use]
    pub fn records_read(&self) -> u64 {
        self.inner.records_read.load(Ordering::Relaxed)
    }

    /// Records emitted through the output sink.
    #[must_use]
    pub fn records_emitted(&self) -> u64 {
        self.inner.records_emitted.load(Ordering::Relaxed)
    }

    /// Key groups handed to the reducer. Zero for map-only runs.
    #[must_use]
    pub fn key_groups(&self) -> u64 {
        self.inner.key_groups.load(Ordering::Relaxed)
    }

    /// Wall-clock duration of the most recent completed run.
    #[must_use]
    pub fn run_duration(&self) -> Option<Duration> {
        let timing = self.inner.timing.lock().unwrap();
        match (timing.start, timing.end) {
            (Some(start), Some(end)) => Some(end.duration_since(start)),
            _ => None,
        }
    }

    /// All metrics as a JSON object.
    #[must_use]
    pub fn as_json(&self) -> Value {
        json!({
            "records_read": self.records_read(),
            "records_emitted": self.records_emitted(),
            "key_groups": self.key_groups(),
            "run_duration_ms": self.run_duration().map(|d| d.as_millis() as u64),
        })
    }

    /// Print all metrics to stdout.
    pub fn print(&self) {
        println!("=== Run Metrics ===");
        println!("  records_read: {}", self.records_read());
        println!("  records_emitted: {}", self.records_emitted());
        println!("  key_groups: {}", self.key_groups());
        if let Some(d) = self.run_duration() {
            println!("  run_duration_ms: {}", d.as_millis());
        }
    }

    /// Save all metrics to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
        let body = serde_json::to_string_pretty(&self.as_json())?;
        f.write_all(body.as_bytes())
            .with_context(|| format!("write metrics to {}", path.display()))?;
        Ok(())
    }

    pub(crate) fn record_start(&self) {
        let mut timing = self.inner.timing.lock().unwrap();
        timing.start = Some(Instant::now());
        timing.end = None;
    }

    pub(crate) fn record_end(&self) {
        let mut timing = self.inner.timing.lock().unwrap();
        timing.end = Some(Instant::now());
    }

    pub(crate) fn add_records_read(&self, n: u64) {
        self.inner.records_read.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn add_records_emitted(&self, n: u64) {
        self.inner.records_emitted.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn add_key_groups(&self, n: u64) {
        self.inner.key_groups.fetch_add(n, Ordering::Relaxed);
    }
}
