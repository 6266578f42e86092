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

//! Line sources for the golden file reader.
//!
//! A [`LineSource`] is a forward-only sequence of text lines that can be
//! closed. Two implementations are provided:
//!
//! - [`ReaderLines`]: any buffered reader, including files opened with
//!   [`ReaderLines::open`]
//! - [`MemoryLines`]: lines already held in memory

use crate::error::{StreamError, StreamResult};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Default buffer size for file-backed sources.
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Default maximum line length in bytes.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1_000_000;

/// Strip one `\n` and then one `\r` from the end of a raw line.
///
/// A trailing `\r` goes even without a following `\n`, so a CRLF file
/// missing its final newline reads the same as one that has it.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// A forward-only, closeable sequence of text lines.
///
/// Lines are returned without their terminator, paired with their 1-based
/// line number. After `close()` the source reports end of input.
pub trait LineSource {
    /// Read the next line, or `None` at end of input.
    fn read_line(&mut self) -> StreamResult<Option<(usize, String)>>;

    /// Release the underlying resource. Calling it again is a no-op.
    fn close(&mut self) -> StreamResult<()>;
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn read_line(&mut self) -> StreamResult<Option<(usize, String)>> {
        (**self).read_line()
    }

    fn close(&mut self) -> StreamResult<()> {
        (**self).close()
    }
}

/// File-backed line source.
pub type FileLines = ReaderLines<BufReader<File>>;

/// Line source over any buffered reader.
///
/// Handles LF and CRLF line endings and rejects lines longer than the
/// configured limit.
///
/// # Example
///
/// ```rust
/// use golden_stream::{LineSource, ReaderLines};
/// use std::io::Cursor;
///
/// let mut lines = ReaderLines::new(Cursor::new("a\r\nb"));
/// assert_eq!(lines.read_line().unwrap(), Some((1, "a".to_string())));
/// assert_eq!(lines.read_line().unwrap(), Some((2, "b".to_string())));
/// assert_eq!(lines.read_line().unwrap(), None);
/// ```
pub struct ReaderLines<R: BufRead> {
    reader: Option<R>,
    line_number: usize,
    max_line_length: usize,
}

impl ReaderLines<BufReader<File>> {
    /// Open a file with the default buffer size.
    pub fn open(path: impl AsRef<Path>) -> StreamResult<Self> {
        Self::open_with_capacity(path, DEFAULT_BUFFER_SIZE)
    }

    /// Open a file with a specific buffer capacity.
    pub fn open_with_capacity(path: impl AsRef<Path>, capacity: usize) -> StreamResult<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::with_capacity(capacity, file)))
    }
}

impl<R: BufRead> ReaderLines<R> {
    /// Create a new line source.
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            line_number: 0,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }

    /// Set the maximum accepted line length in bytes.
    pub fn with_max_line_length(mut self, limit: usize) -> Self {
        self.max_line_length = limit;
        self
    }

    /// Number of lines read so far.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Whether `close()` has been called.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }
}

impl<R: BufRead> LineSource for ReaderLines<R> {
    fn read_line(&mut self) -> StreamResult<Option<(usize, String)>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        let mut buf = Vec::new();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        // Counted before decoding so a bad line still occupies its number.
        self.line_number += 1;

        let length = strip_line_ending(&buf).len();
        buf.truncate(length);

        if length > self.max_line_length {
            return Err(StreamError::LineTooLong {
                line: self.line_number,
                length,
                limit: self.max_line_length,
            });
        }

        let line =
            String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some((self.line_number, line)))
    }

    fn close(&mut self) -> StreamResult<()> {
        self.reader = None;
        Ok(())
    }
}

/// In-memory line source.
///
/// # Example
///
/// ```rust
/// use golden_stream::{LineSource, MemoryLines};
///
/// let mut lines = MemoryLines::from_text("x\n\ny\n");
/// assert_eq!(lines.read_line().unwrap(), Some((1, "x".to_string())));
/// assert_eq!(lines.read_line().unwrap(), Some((2, "".to_string())));
/// assert_eq!(lines.read_line().unwrap(), Some((3, "y".to_string())));
/// assert_eq!(lines.read_line().unwrap(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLines {
    lines: VecDeque<String>,
    line_number: usize,
}

impl MemoryLines {
    /// Split text into lines the same way a buffered reader would.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.split_inclusive('\n').map(|line| {
            let stripped = strip_line_ending(line.as_bytes()).len();
            &line[..stripped]
        }))
    }

    /// Build a source from individual lines.
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            line_number: 0,
        }
    }

    /// Lines not yet read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for MemoryLines {
    fn read_line(&mut self) -> StreamResult<Option<(usize, String)>> {
        Ok(self.lines.pop_front().map(|line| {
            self.line_number += 1;
            (self.line_number, line)
        }))
    }

    fn close(&mut self) -> StreamResult<()> {
        self.lines.clear();
        Ok(())
    }
}
