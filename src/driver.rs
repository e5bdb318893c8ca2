//! The map and reduce drivers.
//!
//! [`Harness`] wires a record stream through user logic to an output sink:
//! input stream, decode, mapper/reducer, [`Output`], encode, output stream.
//! Everything is single-threaded and pull-based; in the reduce path
//! the reducer's own calls into its [`KeyGroup`] drive stream consumption.

use crate::group::KeyGroup;
#[cfg(feature = "metrics")]
use crate::metrics::RunMetrics;
use crate::mr::{Mapper, Reducer};
use crate::record::{RecordCodec, RecordStream};
use crate::sink::LineSink;
use anyhow::Result;
use std::io::{BufRead, Write};

/// A local map/reduce run harness.
///
/// Holds the record codec (field and record delimiters) and drives a mapper
/// or reducer over a character stream. The default harness uses tab-delimited
/// fields and newline-delimited records, matching Hadoop streaming.
#[derive(Clone, Default)]
pub struct Harness {
    codec: RecordCodec,
    #[cfg(feature = "metrics")]
    metrics: Option<RunMetrics>,
}

impl Harness {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A harness with custom ASCII delimiters, fixed for the lifetime of the
    /// harness.
    ///
    /// # Panics
    ///
    /// Panics if either delimiter is not ASCII, or if the two are equal.
    #[must_use]
    pub fn with_delimiters(field_delimiter: char, record_delimiter: char) -> Self {
        Self {
            codec: RecordCodec::new(field_delimiter, record_delimiter),
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }

    /// Attach a metrics handle; subsequent runs record counts and timings
    /// into it.
    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, metrics: RunMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    #[must_use]
    pub fn codec(&self) -> &RecordCodec {
        &self.codec
    }

    /// Run `mapper` over every record of `input`, writing emitted records to
    /// `output`.
    ///
    /// `close` is called exactly once after the last record, unless the
    /// input held zero records, in which case it is never called (a quirk
    /// preserved from the cluster harness this emulates). If the run aborts
    /// with an error, `close` is not called either.
    pub fn map<M: Mapper>(
        &self,
        mut input: impl BufRead,
        output: impl Write,
        mut mapper: M,
    ) -> Result<()> {
        #[cfg(feature = "metrics")]
        if let Some(m) = &self.metrics {
            m.record_start();
        }

        let mut sink = LineSink::new(output, self.codec.clone());
        let mut stream = RecordStream::new(&mut input, self.codec.clone())?;
        let mut saw_records = false;
        while let Some(record) = stream.next_record()? {
            saw_records = true;
            mapper.map(&record, &mut sink)?;
        }
        if saw_records {
            mapper.close()?;
        }
        sink.flush()?;

        #[cfg(feature = "metrics")]
        if let Some(m) = &self.metrics {
            m.add_records_read(stream.records_read());
            m.add_records_emitted(sink.emitted());
            m.record_end();
        }
        Ok(())
    }

    /// Run `reducer` over every key group of `input`, writing emitted
    /// records to `output`.
    ///
    /// The input must already be sorted by first field; groups are maximal
    /// contiguous runs sharing that field. After each `reduce` call the
    /// driver, not the reducer, skips any unconsumed tail of the group, so
    /// the cursor always lands on the first record of the next key. The
    /// `close` rules are the same as for [`map`](Harness::map).
    pub fn reduce<D: Reducer>(
        &self,
        mut input: impl BufRead,
        output: impl Write,
        mut reducer: D,
    ) -> Result<()> {
        #[cfg(feature = "metrics")]
        if let Some(m) = &self.metrics {
            m.record_start();
        }

        let mut sink = LineSink::new(output, self.codec.clone());
        let mut stream = RecordStream::new(&mut input, self.codec.clone())?;
        let mut groups = 0u64;
        loop {
            // Decoded records always have at least one field.
            let key = match stream.peek() {
                Some(record) => record.first().cloned().unwrap_or_default(),
                None => break,
            };
            groups += 1;
            let mut group = KeyGroup::new(&mut stream, key.clone());
            reducer.reduce(&key, &mut group, &mut sink)?;
            group.skip_remaining()?;
        }
        if groups > 0 {
            reducer.close()?;
        }
        sink.flush()?;

        #[cfg(feature = "metrics")]
        if let Some(m) = &self.metrics {
            m.add_records_read(stream.records_read());
            m.add_records_emitted(sink.emitted());
            m.add_key_groups(groups);
            m.record_end();
        }
        Ok(())
    }
}

/// Run a map pass with the default tab/newline harness.
pub fn run_map(input: impl BufRead, output: impl Write, mapper: impl Mapper) -> Result<()> {
    Harness::new().map(input, output, mapper)
}

/// Run a reduce pass with the default tab/newline harness.
pub fn run_reduce(input: impl BufRead, output: impl Write, reducer: impl Reducer) -> Result<()> {
    Harness::new().reduce(input, output, reducer)
}
