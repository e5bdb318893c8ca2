//! # localmr
//!
//! A **local test harness** for Hadoop/Hive streaming map/reduce semantics,
//! no cluster required. It reads tab-delimited records from any character
//! stream, applies a user-supplied mapper or reducer, and writes
//! tab-delimited records to an output stream, reconstructing the cluster's
//! reduce contract (records pre-sorted by key, presented to the reducer as a
//! per-key iterator) from a flat, already-sorted input consumed exactly once.
//!
//! ## Key Features
//!
//! - **Mapper contract** - per-record transformation with 1-to-N expansion
//!   and a lifecycle `close` hook
//! - **Reducer contract** - per-key-group transformation over a lazy,
//!   strictly forward group iterator
//! - **Single-pass grouping** - O(1) memory relative to group size; the
//!   driver resynchronizes the cursor when a reducer stops early
//! - **Strict iterator semantics** - reading past a group's end is a typed
//!   error, exactly as on the cluster
//! - **Pure in-process library** - any `BufRead` in, any `Write` out; no
//!   flags, no environment, no persisted state
//! - **Run metrics** - records read/emitted and groups reduced (feature
//!   `metrics`, on by default)
//!
//! ## Quick Start
//!
//! ```
//! use localmr::{reduce_fn, run_reduce};
//!
//! # fn main() -> anyhow::Result<()> {
//! // Sum the second field per key. Input is pre-sorted by first field,
//! // as the cluster guarantees between map and reduce.
//! let input = "hello\t1\nhello\t2\nokay\t4\nokay\t6\nokay\t2";
//!
//! let mut out = Vec::new();
//! run_reduce(input.as_bytes(), &mut out, reduce_fn(|key, records, output| {
//!     let mut total = 0u64;
//!     while records.has_next() {
//!         total += records.next_record()?[1].parse::<u64>()?;
//!     }
//!     output.collect(&[key.to_string(), total.to_string()])
//! }))?;
//!
//! assert_eq!(String::from_utf8(out)?, "hello\t3\nokay\t12\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! A [`Record`] is an ordered sequence of string fields parsed from one line
//! by splitting on the field delimiter. All fields stay strings: no type
//! coercion, no escaping, no quoting. The first field is, by convention, the
//! grouping key in the reduce path.
//!
//! ### The reduce contract
//!
//! [`Harness::reduce`] partitions the input into maximal contiguous runs
//! sharing the same first field and hands each run to the reducer as a
//! [`KeyGroup`]. The group iterator shares the driver's single forward
//! cursor, so groups are never materialized:
//!
//! - **Under-consumption is legal**: a reducer that stops early just moves
//!   on; the driver skips the rest of the group.
//! - **Over-consumption is an error**: calling
//!   [`next_record`](KeyGroup::next_record) past the group's end fails with
//!   [`GroupExhausted`], and uncaught it aborts the run.
//!
//! ### Lifecycle
//!
//! `close` runs exactly once after the last record or group, but never when
//! the input held zero records, and never when the run aborts with an error.
//! Both quirks match the cluster harness this crate emulates and are pinned
//! by tests.
//!
//! ### Errors
//!
//! Every failure is fatal to the run: user logic errors, I/O errors, and
//! group over-reads all propagate to the caller as `anyhow::Error`. Records
//! already written to the output stream before the failure remain there.
//!
//! ## Module Overview
//!
//! - [`record`] - [`Record`], [`RecordCodec`], and the [`RecordStream`]
//!   forward cursor
//! - [`sink`] - the [`Output`] emit capability and [`LineSink`]
//! - [`mr`] - the [`Mapper`] / [`Reducer`] traits and closure adapters
//! - [`group`] - [`KeyGroup`] and the [`GroupExhausted`] error
//! - [`driver`] - [`Harness`] and the [`run_map`] / [`run_reduce`] entry
//!   points
//! - [`metrics`] - run counters and reporting (feature `metrics`)
//! - [`testing`] - in-memory run helpers, identity logic, fixtures

pub mod driver;
pub mod group;
pub mod mr;
pub mod record;
pub mod sink;
pub mod testing;

#[cfg(feature = "metrics")]
pub mod metrics;

// General re-exports
pub use driver::{Harness, run_map, run_reduce};
pub use group::{GroupExhausted, KeyGroup};
pub use mr::{MapFn, Mapper, ReduceFn, Reducer, map_fn, reduce_fn};
pub use record::{Record, RecordCodec, RecordStream};
pub use sink::{LineSink, Output};

// Gated re-exports
#[cfg(feature = "metrics")]
pub use metrics::RunMetrics;
