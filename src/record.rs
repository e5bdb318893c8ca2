//! Record encoding, decoding, and the forward cursor over a line stream.
//!
//! A [`Record`] is an ordered sequence of string fields parsed from one line
//! of input. Fields are opaque text: there is no trimming, no escaping, and
//! no quoting. A field value that itself contains the field delimiter will
//! silently corrupt parsing; this is an inherited limitation of the
//! streaming contract, not something this crate tries to fix.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// An ordered sequence of string fields parsed from one input line.
///
/// Decoding always yields at least one field: splitting an empty line
/// produces a single empty field. By convention the first field is the
/// grouping key in the reduce path.
pub type Record = Vec<String>;

/// Splits lines into fields and frames records on an output stream.
///
/// The field delimiter separates fields within a record (default: tab); the
/// record delimiter terminates each record (default: newline). Both must be
/// ASCII so record framing can operate on raw bytes.
#[derive(Clone, Debug)]
pub struct RecordCodec {
    field_delimiter: char,
    record_delimiter: char,
}

impl Default for RecordCodec {
    fn default() -> Self {
        Self::new('\t', '\n')
    }
}

impl RecordCodec {
    /// Create a codec with the given delimiters.
    ///
    /// # Panics
    ///
    /// Panics if either delimiter is not ASCII, or if the two are equal.
    #[must_use]
    pub fn new(field_delimiter: char, record_delimiter: char) -> Self {
        assert!(
            field_delimiter.is_ascii() && record_delimiter.is_ascii(),
            "delimiters must be ASCII"
        );
        assert_ne!(
            field_delimiter, record_delimiter,
            "field and record delimiters must differ"
        );
        Self { field_delimiter, record_delimiter }
    }

    #[must_use]
    pub fn field_delimiter(&self) -> char {
        self.field_delimiter
    }

    #[must_use]
    pub fn record_delimiter(&self) -> char {
        self.record_delimiter
    }

    /// Split one line into fields. Never fails; a malformed line simply
    /// yields a different field count for downstream logic to deal with.
    #[must_use]
    pub fn decode(&self, line: &str) -> Record {
        line.split(self.field_delimiter).map(str::to_string).collect()
    }

    /// Join fields with the field delimiter, append the record delimiter,
    /// and write the result to `w`.
    pub fn encode_to(&self, w: &mut dyn Write, record: &[String]) -> Result<()> {
        for (i, field) in record.iter().enumerate() {
            if i > 0 {
                w.write_all(&[self.field_delimiter as u8])?;
            }
            w.write_all(field.as_bytes())?;
        }
        w.write_all(&[self.record_delimiter as u8])?;
        Ok(())
    }
}

/// The single forward cursor over a decoded line stream.
///
/// Holds exactly one decoded lookahead record, primed at construction and
/// refilled on every [`next_record`](RecordStream::next_record) call. The
/// underlying stream is consumed exactly once; there is no rewinding.
pub struct RecordStream<'r> {
    reader: &'r mut dyn BufRead,
    codec: RecordCodec,
    lookahead: Option<Record>,
    records_read: u64,
    buf: Vec<u8>,
}

impl<'r> RecordStream<'r> {
    /// Wrap a reader and prime the lookahead with the first record.
    pub fn new(reader: &'r mut dyn BufRead, codec: RecordCodec) -> Result<Self> {
        let mut stream = Self {
            reader,
            codec,
            lookahead: None,
            records_read: 0,
            buf: Vec::with_capacity(128),
        };
        stream.lookahead = stream.read_record()?;
        Ok(stream)
    }

    /// The next record, if any, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&Record> {
        self.lookahead.as_ref()
    }

    /// Consume and return the next record, or `None` once the stream is
    /// exhausted. I/O and UTF-8 errors propagate.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        match self.lookahead.take() {
            None => Ok(None),
            Some(record) => {
                self.lookahead = self.read_record()?;
                Ok(Some(record))
            }
        }
    }

    /// Total records decoded from the underlying stream so far.
    #[must_use]
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    fn read_record(&mut self) -> Result<Option<Record>> {
        self.buf.clear();
        let delimiter = self.codec.record_delimiter() as u8;
        let n = self
            .reader
            .read_until(delimiter, &mut self.buf)
            .context("read record from input stream")?;
        if n == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&delimiter) {
            self.buf.pop();
        }
        // Matches readLine semantics when framing on newlines.
        if delimiter == b'\n' && self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        let line = std::str::from_utf8(&self.buf).context("input is not valid UTF-8")?;
        self.records_read += 1;
        Ok(Some(self.codec.decode(line)))
    }
}
