//! Pull-based line source for ESO file streaming
//!
//! This module provides the single point through which the parsers
//! consume the input stream: one logical line per pull, a monotonic
//! line counter, and a progress tick at every chunk boundary. The
//! returned line borrows an internal buffer and is valid until the
//! next pull.

use std::io::BufRead;

use tracing::debug;

use crate::app::services::progress::ProgressSink;
use crate::{Error, Result};

/// Streaming line reader with progress reporting
///
/// The source owns both the input stream and the progress sink for the
/// duration of a parse. Cancellation is observed cooperatively: at
/// every chunk boundary the sink is ticked and its cancellation flag
/// checked, failing the pull with [`Error::Cancelled`] when set.
pub struct LineSource<R: BufRead, S: ProgressSink> {
    reader: R,
    sink: S,
    buffer: String,
    line_counter: u64,
    chunk_size: u64,
}

impl<R: BufRead, S: ProgressSink> LineSource<R, S> {
    /// Create a line source over a buffered reader
    pub fn new(reader: R, sink: S, chunk_size: u64) -> Self {
        Self {
            reader,
            sink,
            buffer: String::new(),
            line_counter: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Number of lines pulled so far
    pub fn line_counter(&self) -> u64 {
        self.line_counter
    }

    /// Access the progress sink, e.g. for section logging
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Pull the next logical line, without its terminator
    ///
    /// Returns `Ok(None)` once the stream is exhausted; callers decide
    /// whether exhaustion at their position means a clean end or an
    /// incomplete file.
    pub fn next_line(&mut self) -> Result<Option<&str>> {
        self.buffer.clear();
        let bytes = self.reader.read_line(&mut self.buffer)?;
        if bytes == 0 {
            debug!("input stream exhausted after {} lines", self.line_counter);
            return Ok(None);
        }

        self.line_counter += 1;
        if self.line_counter % self.chunk_size == 0 {
            self.sink.tick();
            if self.sink.is_cancelled() {
                return Err(Error::cancelled(self.line_counter));
            }
        }

        // Strip the line terminator; carriage returns appear in files
        // produced on Windows
        while self.buffer.ends_with('\n') || self.buffer.ends_with('\r') {
            self.buffer.pop();
        }
        Ok(Some(self.buffer.as_str()))
    }

    /// Emit the closing tick for a partial final chunk
    pub fn finish(&mut self) {
        if self.line_counter % self.chunk_size != 0 {
            self.sink.tick();
        }
    }
}
