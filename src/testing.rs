//! Testing utilities for harness runs.
//!
//! This module provides the pieces needed to write idiomatic tests against
//! mappers and reducers:
//!
//! - **In-memory runs**: [`map_str`] and [`reduce_str`] run user logic over
//!   a string and hand back the output as a string
//! - **Identity logic**: [`identity_mapper`] and [`identity_reducer`] pass
//!   every record through unchanged
//! - **Record capture**: [`VecSink`] collects emitted records for direct
//!   assertion, bypassing the codec
//! - **Fixtures**: [`fixture_file`] writes input to a temp file for
//!   file-backed runs
//!
//! # Quick Start
//!
//! ```
//! use localmr::testing::{identity_mapper, map_str};
//!
//! # fn main() -> anyhow::Result<()> {
//! let out = map_str("a\tb\nc\td", identity_mapper())?;
//! assert_eq!(out, "a\tb\nc\td\n");
//! # Ok(())
//! # }
//! ```

use crate::driver::Harness;
use crate::group::KeyGroup;
use crate::mr::{Mapper, Reducer};
use crate::record::Record;
use crate::sink::Output;
use anyhow::{Context, Result};
use std::io::Write;
use tempfile::NamedTempFile;

/// Run `mapper` over `input` with the default tab/newline harness and
/// return the output as a string.
pub fn map_str(input: &str, mapper: impl Mapper) -> Result<String> {
    let mut out = Vec::new();
    Harness::new().map(input.as_bytes(), &mut out, mapper)?;
    String::from_utf8(out).context("mapper emitted non-UTF-8 output")
}

/// Run `reducer` over `input` with the default tab/newline harness and
/// return the output as a string.
pub fn reduce_str(input: &str, reducer: impl Reducer) -> Result<String> {
    let mut out = Vec::new();
    Harness::new().reduce(input.as_bytes(), &mut out, reducer)?;
    String::from_utf8(out).context("reducer emitted non-UTF-8 output")
}

/// A mapper that emits every record unchanged.
pub struct IdentityMapper;

impl Mapper for IdentityMapper {
    fn map(&mut self, record: &[String], output: &mut dyn Output) -> Result<()> {
        output.collect(record)
    }
}

#[must_use]
pub fn identity_mapper() -> IdentityMapper {
    IdentityMapper
}

/// A reducer that drains every group, emitting each record unchanged.
pub struct IdentityReducer;

impl Reducer for IdentityReducer {
    fn reduce(
        &mut self,
        _key: &str,
        records: &mut KeyGroup<'_, '_>,
        output: &mut dyn Output,
    ) -> Result<()> {
        while records.has_next() {
            let record = records.next_record()?;
            output.collect(&record)?;
        }
        Ok(())
    }
}

#[must_use]
pub fn identity_reducer() -> IdentityReducer {
    IdentityReducer
}

/// An [`Output`] that captures emitted records in memory instead of encoding
/// them, for asserting on records field-by-field.
#[derive(Default)]
pub struct VecSink {
    records: Vec<Record>,
}

impl VecSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl Output for VecSink {
    fn collect(&mut self, record: &[String]) -> Result<()> {
        self.records.push(record.to_vec());
        Ok(())
    }
}

/// Write `contents` to a named temp file and return its handle. The file is
/// deleted when the handle drops.
pub fn fixture_file(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("create fixture file")?;
    file.write_all(contents.as_bytes())
        .context("write fixture file")?;
    file.flush()?;
    Ok(file)
}

/// Assert that captured records match the expected fields exactly, in order.
///
/// # Panics
///
/// Panics with a detailed message if the records differ in count or content.
pub fn assert_records_equal(actual: &[Record], expected: &[&[&str]]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Record count mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a.as_slice(),
            *e,
            "Record mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}"
        );
    }
}
