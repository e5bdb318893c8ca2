//! The emit capability handed to user logic.

use crate::record::RecordCodec;
use anyhow::Result;
use std::io::Write;

/// The capability a mapper or reducer uses to emit one record.
///
/// Implementations must write records in call order. `collect` may be
/// invoked zero or many times per input record or key group.
pub trait Output {
    /// Emit one record to the destination.
    fn collect(&mut self, record: &[String]) -> Result<()>;
}

/// An [`Output`] that encodes each record through a [`RecordCodec`] and
/// writes it to the destination stream immediately.
///
/// No buffering happens across calls beyond what the underlying writer
/// performs; wrap the destination in a `BufWriter` if that matters.
pub struct LineSink<W: Write> {
    writer: W,
    codec: RecordCodec,
    emitted: u64,
}

impl<W: Write> LineSink<W> {
    #[must_use]
    pub fn new(writer: W, codec: RecordCodec) -> Self {
        Self { writer, codec, emitted: 0 }
    }

    /// Number of records emitted through this sink so far.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Output for LineSink<W> {
    fn collect(&mut self, record: &[String]) -> Result<()> {
        self.codec.encode_to(&mut self.writer, record)?;
        self.emitted += 1;
        Ok(())
    }
}
