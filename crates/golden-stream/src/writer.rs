// Dweve Golden - Streaming golden files for regression testing
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Golden file writer.
//!
//! Each [`GoldenWriter::write`] call appends one complete block: the marker
//! line, one CSV line per row and a blank separator line. Calls from several
//! threads are serialized by a mutex, so blocks never interleave.

use crate::error::{StreamError, StreamResult};
use crate::marker::{marker_line, DEFAULT_PREAMBLE};
use golden_csv::{CodecConfig, RowCodec};
use parking_lot::Mutex;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Configuration for [`GoldenWriter`].
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Comment line written before the first block. `None` writes no
    /// preamble.
    ///
    /// Default: the "automatically generated" notice
    pub preamble: Option<String>,

    /// CSV dialect of the data lines.
    pub codec: CodecConfig,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            preamble: Some(DEFAULT_PREAMBLE.to_string()),
            codec: CodecConfig::default(),
        }
    }
}

struct WriterState<W> {
    sink: Option<W>,
    preamble_written: bool,
    blocks_written: usize,
}

/// Thread-safe golden file writer.
///
/// # Example
///
/// ```rust
/// use golden_stream::GoldenWriter;
///
/// let writer = GoldenWriter::new(Vec::new());
/// writer.write(vec![vec!["1", "foo"], vec!["2", "bar"]], "qt_1").unwrap();
///
/// let bytes = writer.into_inner().unwrap();
/// let text = String::from_utf8(bytes).unwrap();
/// assert!(text.ends_with("-- !qt_1 --\n1,foo\n2,bar\n\n"));
/// ```
pub struct GoldenWriter<W: Write> {
    state: Mutex<WriterState<W>>,
    preamble: Option<String>,
    codec: RowCodec,
}

impl GoldenWriter<BufWriter<File>> {
    /// Create (or truncate) a golden file, creating parent directories as
    /// needed.
    pub fn create(path: impl AsRef<Path>) -> StreamResult<Self> {
        Self::create_with_config(path, WriterConfig::default())
    }

    /// Create a golden file with a custom configuration.
    pub fn create_with_config(path: impl AsRef<Path>, config: WriterConfig) -> StreamResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        debug!(path = %path.display(), "created golden file");
        Ok(Self::with_config(BufWriter::new(file), config))
    }
}

impl<W: Write> GoldenWriter<W> {
    /// Create a writer over any sink with the default configuration.
    pub fn new(sink: W) -> Self {
        Self::with_config(sink, WriterConfig::default())
    }

    /// Create a writer with a custom configuration.
    pub fn with_config(sink: W, config: WriterConfig) -> Self {
        Self {
            state: Mutex::new(WriterState {
                sink: Some(sink),
                preamble_written: false,
                blocks_written: 0,
            }),
            preamble: config.preamble,
            codec: RowCodec::new(config.codec),
        }
    }

    /// Append one block tagged `tag` holding `rows`.
    ///
    /// Rows are encoded before the sink is touched, so an encoding failure
    /// leaves the file unchanged. The block is flushed before returning.
    ///
    /// # Errors
    ///
    /// - `StreamError::WriterClosed`: `close()` was already called
    /// - `StreamError::Csv`: a row could not be encoded
    /// - `StreamError::Io`: the sink failed
    pub fn write<R, I>(&self, rows: R, tag: &str) -> StreamResult<()>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator,
        I::Item: Display,
    {
        let mut block = marker_line(tag);
        block.push('\n');
        let mut row_count = 0usize;
        for row in rows {
            block.push_str(&self.codec.encode_row(row)?);
            block.push('\n');
            row_count += 1;
        }
        block.push('\n');

        let mut state = self.state.lock();
        let WriterState {
            sink,
            preamble_written,
            blocks_written,
        } = &mut *state;
        let sink = sink.as_mut().ok_or(StreamError::WriterClosed)?;

        if !*preamble_written {
            if let Some(preamble) = &self.preamble {
                sink.write_all(preamble.as_bytes())?;
                sink.write_all(b"\n")?;
            }
            *preamble_written = true;
        }
        sink.write_all(block.as_bytes())?;
        sink.flush()?;
        *blocks_written += 1;

        debug!(tag, rows = row_count, "wrote golden block");
        Ok(())
    }

    /// Number of blocks written so far.
    pub fn blocks_written(&self) -> usize {
        self.state.lock().blocks_written
    }

    /// Whether `close()` has been called.
    pub fn is_closed(&self) -> bool {
        self.state.lock().sink.is_none()
    }

    /// Flush and release the sink. Further calls do nothing.
    ///
    /// Waits for any `write()` in progress on another thread.
    pub fn close(&self) -> StreamResult<()> {
        let mut state = self.state.lock();
        if let Some(mut sink) = state.sink.take() {
            sink.flush()?;
            debug!(blocks = state.blocks_written, "closed golden writer");
        }
        Ok(())
    }

    /// Consume the writer and return its sink, or `None` if it was closed.
    pub fn into_inner(self) -> Option<W> {
        self.state.into_inner().sink
    }
}
