//! # Bulk JSON Codec
//!
//! Two wire formats are supported and never mixed:
//!
//! - **JSON array** ([`Store::to_json`] / [`Store::from_json`]): the whole
//!   sequence as one JSON array value.
//! - **JSON lines** ([`Store::to_json_lines`] / [`Store::from_json_lines`]):
//!   one compact JSON value per element, each followed by a single `\n`
//!   (including the last), no blank lines and no enclosing brackets. An empty
//!   store encodes to zero bytes.
//!
//! Line encoding marshals elements in parallel on a [`WorkerPool`]; every
//! element lands in its own output slot, so the output order is the store's
//! index order whatever order the workers finish in.
//!
//! Line decoding is all-or-nothing: every record is parsed before anything is
//! appended, so a bad record leaves the store as it was.

use crate::error::{StoreError, StoreResult};
use crate::pool::{WorkerPool, available_workers};
use crate::store::Store;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{BufRead, Write};

#[cfg(feature = "tracing")]
use tracing::{debug, instrument};

const RECORD_SEPARATOR: u8 = b'\n';

/// Settings for parallel line encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Number of workers marshaling elements at once
    pub workers: usize,
}

impl CodecConfig {
    /// Create a config sized to the machine's available parallelism
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of marshaling workers (zero is treated as one)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    fn pool(&self) -> WorkerPool {
        WorkerPool::new(self.workers)
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            workers: available_workers(),
        }
    }
}

impl<T: Serialize> Store<T> {
    /// Encode the whole sequence as a single JSON array
    pub fn to_json(&self) -> StoreResult<Vec<u8>> {
        let list = self.data.read();
        Ok(serde_json::to_vec(&*list)?)
    }
}

impl<T: Serialize + Sync> Store<T> {
    /// Encode every element as one JSON line using the default config
    pub fn to_json_lines(&self) -> StoreResult<Vec<u8>> {
        self.to_json_lines_with(&CodecConfig::default())
    }

    /// Encode every element as one JSON line
    ///
    /// The first marshal failure aborts the whole encoding and no partial
    /// output is returned.
    pub fn to_json_lines_with(&self, config: &CodecConfig) -> StoreResult<Vec<u8>> {
        self.encode_lines(config).map(|(bytes, _)| bytes)
    }

    /// Write the JSON lines encoding into `writer` using the default config
    ///
    /// Returns the number of records written.
    pub fn write_json_lines<W: Write>(&self, writer: &mut W) -> StoreResult<usize> {
        self.write_json_lines_with(&CodecConfig::default(), writer)
    }

    /// Write the JSON lines encoding into `writer`
    ///
    /// Every element is marshaled before the first byte is written, so a
    /// marshal failure leaves `writer` untouched. Records are then written one
    /// at a time in index order without joining them into a single buffer.
    /// Returns the number of records written.
    pub fn write_json_lines_with<W: Write>(
        &self,
        config: &CodecConfig,
        writer: &mut W,
    ) -> StoreResult<usize> {
        let records = self.encode_records(config)?;
        for record in &records {
            writer.write_all(record)?;
            writer.write_all(&[RECORD_SEPARATOR])?;
        }
        writer.flush()?;
        Ok(records.len())
    }

    pub(crate) fn encode_lines(&self, config: &CodecConfig) -> StoreResult<(Vec<u8>, usize)> {
        let records = self.encode_records(config)?;
        let count = records.len();
        Ok((join_records(records), count))
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(skip(self, config), fields(workers = config.workers))
    )]
    fn encode_records(&self, config: &CodecConfig) -> StoreResult<Vec<Vec<u8>>> {
        let guard = self.data.read();
        let list = &*guard;

        if list.is_empty() {
            return Ok(Vec::new());
        }

        let records = config
            .pool()
            .map(list.len(), |idx| Ok(serde_json::to_vec(&list[idx])?))?;

        #[cfg(feature = "tracing")]
        debug!(records = records.len(), "encoded json lines");

        Ok(records)
    }
}

impl<T: DeserializeOwned> Store<T> {
    /// Decode a JSON array and append its elements in order
    ///
    /// Returns the number of elements appended.
    pub fn from_json(&self, bytes: &[u8]) -> StoreResult<usize> {
        let items: Vec<T> = serde_json::from_slice(bytes)?;
        let count = items.len();
        self.extend(items);
        Ok(count)
    }

    /// Decode JSON lines and append one element per record, in file order
    ///
    /// The empty segment after the final `\n` is not a record. A blank line
    /// anywhere else, or a record that fails to decode, is an
    /// [`StoreError::Encoding`] error naming the 1-based line, and the store
    /// is left unchanged. Framing is strict: a `\r` before the `\n` makes the
    /// record invalid. Input without a trailing `\n` is accepted.
    ///
    /// Returns the number of elements appended.
    #[cfg_attr(feature = "tracing", instrument(skip(self, bytes), fields(len = bytes.len())))]
    pub fn from_json_lines(&self, bytes: &[u8]) -> StoreResult<usize> {
        let body = bytes.strip_suffix(&[RECORD_SEPARATOR]).unwrap_or(bytes);
        if body.is_empty() {
            return Ok(0);
        }

        let items = body
            .split(|&b| b == RECORD_SEPARATOR)
            .enumerate()
            .map(|(line, record)| decode_record(line, record))
            .collect::<StoreResult<Vec<T>>>()?;

        self.append_decoded(items)
    }

    /// Read JSON lines from `reader` until end of input and append them
    ///
    /// Same framing and failure rules as [`from_json_lines`](Self::from_json_lines);
    /// read failures are reported as [`StoreError::Io`].
    pub fn read_json_lines<R: BufRead>(&self, reader: R) -> StoreResult<usize> {
        let mut segments = reader.split(RECORD_SEPARATOR).peekable();
        let mut items = Vec::new();
        let mut line = 0;

        while let Some(record) = segments.next() {
            let record = record?;
            // Input made of the final separator alone holds no records
            if line == 0 && record.is_empty() && segments.peek().is_none() {
                break;
            }
            items.push(decode_record(line, &record)?);
            line += 1;
        }

        self.append_decoded(items)
    }

    fn append_decoded(&self, items: Vec<T>) -> StoreResult<usize> {
        let count = items.len();

        #[cfg(feature = "tracing")]
        debug!(records = count, "decoded json lines");

        self.lock().extend(items);
        Ok(count)
    }
}

fn decode_record<T: DeserializeOwned>(line: usize, record: &[u8]) -> StoreResult<T> {
    if record.is_empty() {
        return Err(StoreError::encoding(format!("line {}: empty record", line + 1)));
    }
    // serde_json would skip it as trailing whitespace
    if record.last() == Some(&b'\r') {
        return Err(StoreError::encoding(format!(
            "line {}: carriage return before record separator",
            line + 1
        )));
    }
    serde_json::from_slice(record)
        .map_err(|err| StoreError::encoding(format!("line {}: {err}", line + 1)))
}

fn join_records(records: Vec<Vec<u8>>) -> Vec<u8> {
    let total = records.iter().map(|r| r.len() + 1).sum();
    let mut out = Vec::with_capacity(total);
    for record in records {
        out.extend_from_slice(&record);
        out.push(RECORD_SEPARATOR);
    }
    out
}
