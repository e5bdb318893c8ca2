//! Per-key grouping over an already-sorted record stream.
//!
//! A [`KeyGroup`] exposes one maximal contiguous run of records sharing the
//! same first field. It borrows the driver's [`RecordStream`] cursor rather
//! than owning a copy, so advancing the group advances the one and only pass
//! over the input. Group boundaries are determined purely by adjacency and
//! equality of the first field: no re-sorting, no lookahead beyond the
//! cursor's single buffered record.

use crate::record::{Record, RecordStream};
use anyhow::Result;
use std::fmt;

/// The error returned when a reducer requests a record past the end of its
/// key group.
///
/// This mirrors the strict iterator contract of the cluster runtime: asking
/// for an element that is not there is a reducer logic bug, so it is a
/// hard failure rather than a permissive stop. Recover it from an
/// `anyhow::Error` with `downcast_ref::<GroupExhausted>()`.
#[derive(Clone, Debug)]
pub struct GroupExhausted {
    key: String,
}

impl GroupExhausted {
    /// The key of the group that was over-read.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for GroupExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key group {:?} has no more records", self.key)
    }
}

impl std::error::Error for GroupExhausted {}

/// A strictly forward, single-pass iterator over the records of one key
/// group, including the key field as each record's first element.
pub struct KeyGroup<'g, 'r> {
    stream: &'g mut RecordStream<'r>,
    key: String,
}

impl<'g, 'r> KeyGroup<'g, 'r> {
    pub(crate) fn new(stream: &'g mut RecordStream<'r>, key: String) -> Self {
        Self { stream, key }
    }

    /// The shared first field of every record in this group.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether another record with this group's key remains.
    #[must_use]
    pub fn has_next(&self) -> bool {
        matches!(
            self.stream.peek(),
            Some(record) if record.first().map(String::as_str) == Some(self.key.as_str())
        )
    }

    /// Consume and return the next record of this group.
    ///
    /// Fails with [`GroupExhausted`] if the group has no more records;
    /// propagated uncaught, that aborts the run. I/O errors from refilling
    /// the underlying cursor also propagate.
    pub fn next_record(&mut self) -> Result<Record> {
        if self.has_next()
            && let Some(record) = self.stream.next_record()?
        {
            return Ok(record);
        }
        Err(anyhow::Error::new(GroupExhausted { key: self.key.clone() }))
    }

    /// Advance the shared cursor past any unconsumed tail of this group.
    ///
    /// The driver calls this after the reducer returns, so the cursor is
    /// positioned at the first record of the next key regardless of how far
    /// the reducer read.
    pub(crate) fn skip_remaining(&mut self) -> Result<()> {
        while self.has_next() {
            self.stream.next_record()?;
        }
        Ok(())
    }
}
