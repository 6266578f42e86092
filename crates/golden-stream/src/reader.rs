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

//! Block-at-a-time golden file reader.
//!
//! The reader scans the file for marker lines and hands out one [`Block`] at
//! a time. Only the current line of lookahead and the rows of the current
//! block are ever pending; the file is never loaded as a whole.
//!
//! # State Machine
//!
//! ```text
//!             marker found                 next_block()
//!  Seeking ----------------> BlockReady -----------------> InBlock
//!     ^  \                                                    |
//!     |   \ end of input                                      |
//!     |    `--------------> Exhausted                         |
//!     |                                                       |
//!     `------------- advance: drain undrained rows -----------'
//! ```

use crate::block::{Block, BlockBody};
use crate::error::StreamResult;
use crate::lookahead::Lookahead;
use crate::marker::{is_comment, parse_tag};
use crate::source::{
    FileLines, LineSource, MemoryLines, ReaderLines, DEFAULT_BUFFER_SIZE, DEFAULT_MAX_LINE_LENGTH,
};
use golden_csv::{CodecConfig, Row, RowCodec};
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, trace, warn};

/// Configuration for [`GoldenReader`].
///
/// # Example
///
/// ```rust
/// use golden_stream::GoldenReaderConfig;
///
/// let config = GoldenReaderConfig {
///     max_line_length: 64 * 1024,
///     ..Default::default()
/// };
/// assert_eq!(config.codec.delimiter, b',');
/// ```
#[derive(Debug, Clone)]
pub struct GoldenReaderConfig {
    /// Buffer size for file-backed sources.
    ///
    /// Default: 64KB
    pub buffer_size: usize,

    /// Maximum line length in bytes. Longer lines fail with
    /// [`StreamError::LineTooLong`](crate::StreamError::LineTooLong).
    ///
    /// Default: 1,000,000 bytes (1MB)
    pub max_line_length: usize,

    /// CSV dialect of the data lines.
    pub codec: CodecConfig,
}

impl Default for GoldenReaderConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            codec: CodecConfig::default(),
        }
    }
}

#[derive(Debug)]
enum ScanState {
    /// Looking for the next marker line.
    Seeking,
    /// A marker was read; its block has not been handed out yet.
    BlockReady { tag: String, marker_line: usize },
    /// A block was handed out and may still hold unread rows.
    InBlock { tag: String },
    /// No more blocks.
    Exhausted,
}

/// Streaming golden file reader.
///
/// # Examples
///
/// ## Iterating Blocks
///
/// ```rust
/// use golden_stream::GoldenReader;
///
/// let text = "\
/// -- This file is automatically generated.
/// -- !q1 --
/// 1,a
///
/// -- !q2 --
/// 2,b
///
/// ";
///
/// let mut reader = GoldenReader::from_text(text);
/// let mut tags = Vec::new();
/// while let Some(block) = reader.next_block().unwrap() {
///     tags.push(block.tag().to_string());
/// }
/// assert_eq!(tags, vec!["q1", "q2"]);
/// ```
///
/// ## Looking Up One Block
///
/// ```rust,no_run
/// use golden_stream::GoldenReader;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut reader = GoldenReader::open("regression/query.out")?;
/// if let Some(block) = reader.find_block("select_all")? {
///     for row in block {
///         println!("{:?}", row?);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct GoldenReader<S: LineSource> {
    lines: Lookahead<S>,
    state: ScanState,
    codec: RowCodec,
}

impl GoldenReader<FileLines> {
    /// Open a golden file with the default configuration.
    pub fn open(path: impl AsRef<Path>) -> StreamResult<Self> {
        Self::open_with_config(path, GoldenReaderConfig::default())
    }

    /// Open a golden file with a custom configuration.
    pub fn open_with_config(
        path: impl AsRef<Path>,
        config: GoldenReaderConfig,
    ) -> StreamResult<Self> {
        let path = path.as_ref();
        let source = ReaderLines::open_with_capacity(path, config.buffer_size)?
            .with_max_line_length(config.max_line_length);
        debug!(path = %path.display(), "opened golden file");
        Ok(Self::with_config(source, config))
    }
}

impl<R: Read> GoldenReader<ReaderLines<BufReader<R>>> {
    /// Read a golden file from any reader.
    pub fn from_reader(reader: R, config: GoldenReaderConfig) -> Self {
        let source = ReaderLines::new(BufReader::with_capacity(config.buffer_size, reader))
            .with_max_line_length(config.max_line_length);
        Self::with_config(source, config)
    }
}

impl GoldenReader<MemoryLines> {
    /// Read a golden file held in memory.
    pub fn from_text(text: &str) -> Self {
        Self::new(MemoryLines::from_text(text))
    }
}

impl<S: LineSource> GoldenReader<S> {
    /// Create a reader over a line source.
    pub fn new(source: S) -> Self {
        Self::with_config(source, GoldenReaderConfig::default())
    }

    /// Create a reader with a custom configuration.
    ///
    /// Only the codec settings apply here; buffering and line limits belong
    /// to the source.
    pub fn with_config(source: S, config: GoldenReaderConfig) -> Self {
        Self {
            lines: Lookahead::new(source),
            state: ScanState::Seeking,
            codec: RowCodec::new(config.codec),
        }
    }

    /// Whether another block follows.
    ///
    /// Drains the rows of the previously returned block if the caller left
    /// any unread.
    pub fn has_next_block(&mut self) -> StreamResult<bool> {
        self.advance()?;
        Ok(matches!(self.state, ScanState::BlockReady { .. }))
    }

    /// Move to the next block and hand it out.
    ///
    /// Rows of the previous block that were not read are discarded. Returns
    /// `None` once the file has no more blocks.
    pub fn next_block(&mut self) -> StreamResult<Option<Block<'_, S>>> {
        self.advance()?;
        match std::mem::replace(&mut self.state, ScanState::Exhausted) {
            ScanState::BlockReady { tag, marker_line } => {
                self.state = ScanState::InBlock { tag: tag.clone() };
                Ok(Some(Block::new(
                    tag,
                    marker_line,
                    &mut self.lines,
                    self.codec,
                )))
            }
            other => {
                self.state = other;
                Ok(None)
            }
        }
    }

    /// Advance to the next block tagged `tag`, draining every block in
    /// between.
    ///
    /// Returns `true` when such a block is ready for [`next_block`](Self::next_block)
    /// and `false` when the input ended first.
    pub fn has_next_tag_block(&mut self, tag: &str) -> StreamResult<bool> {
        loop {
            self.advance()?;
            match &self.state {
                ScanState::BlockReady { tag: current, .. } if current == tag => return Ok(true),
                ScanState::BlockReady {
                    tag: current,
                    marker_line,
                } => {
                    debug!(tag = %current, line = marker_line, wanted = tag, "skipping block");
                    let current = current.clone();
                    self.state = ScanState::InBlock { tag: current };
                }
                _ => return Ok(false),
            }
        }
    }

    /// Find the next block tagged `tag`, draining every block in between.
    pub fn find_block(&mut self, tag: &str) -> StreamResult<Option<Block<'_, S>>> {
        if self.has_next_tag_block(tag)? {
            self.next_block()
        } else {
            Ok(None)
        }
    }

    /// Read every remaining block with all of its rows.
    pub fn read_all(&mut self) -> StreamResult<Vec<(String, Vec<Row>)>> {
        let mut blocks = Vec::new();
        while let Some(block) = self.next_block()? {
            let tag = block.tag().to_string();
            blocks.push((tag, block.collect_rows()?));
        }
        Ok(blocks)
    }

    /// Close the underlying source. The reader reports no further blocks.
    pub fn close(&mut self) -> StreamResult<()> {
        self.state = ScanState::Exhausted;
        self.lines.close()
    }

    fn advance(&mut self) -> StreamResult<()> {
        loop {
            match &self.state {
                ScanState::BlockReady { .. } | ScanState::Exhausted => return Ok(()),
                ScanState::InBlock { tag } => {
                    let mut skipped = 0usize;
                    for line in BlockBody::new(&mut self.lines) {
                        line?;
                        skipped += 1;
                    }
                    if skipped > 0 {
                        trace!(tag = %tag, skipped, "drained unread lines");
                    }
                    self.state = ScanState::Seeking;
                }
                ScanState::Seeking => self.seek()?,
            }
        }
    }

    fn seek(&mut self) -> StreamResult<()> {
        while self.lines.has_next()? {
            let line = self.lines.next_line()?;
            if let Some(tag) = parse_tag(&line) {
                let marker_line = self.lines.line_number();
                trace!(tag, line = marker_line, "found block");
                self.state = ScanState::BlockReady {
                    tag: tag.to_string(),
                    marker_line,
                };
                return Ok(());
            }
            if !line.is_empty() && !is_comment(&line) {
                warn!(
                    line = self.lines.line_number(),
                    "ignoring data line outside of any block"
                );
            }
        }
        self.state = ScanState::Exhausted;
        Ok(())
    }
}
