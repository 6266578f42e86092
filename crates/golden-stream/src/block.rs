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

//! Per-block row iteration.
//!
//! The rows of one block are produced by a chain of small iterators over the
//! shared [`Lookahead`] source:
//!
//! 1. [`BlockBody`] yields the data lines up to the next marker, skipping
//!    comment lines.
//! 2. [`TrimTrailingBlank`] drops the blank separator that ends the block.
//! 3. [`Block`] decodes each remaining line into a row.

use crate::error::StreamResult;
use crate::lookahead::Lookahead;
use crate::marker::{is_comment, is_marker};
use crate::source::LineSource;
use golden_csv::{Row, RowCodec};
use std::iter::Peekable;
use tracing::trace;

/// Data lines of the block the source is positioned in.
///
/// Stops without consuming at the next marker line, so the marker stays
/// available to whoever scans for the next block. Yields `(line_number, line)`.
pub struct BlockBody<'a, S: LineSource> {
    lines: &'a mut Lookahead<S>,
    finished: bool,
}

impl<'a, S: LineSource> BlockBody<'a, S> {
    /// Start reading block data at the current position of `lines`.
    pub fn new(lines: &'a mut Lookahead<S>) -> Self {
        Self {
            lines,
            finished: false,
        }
    }

    fn next_data_line(&mut self) -> StreamResult<Option<(usize, String)>> {
        while self.lines.has_next()? {
            let line = self.lines.peek()?;
            if is_marker(line) {
                return Ok(None);
            }
            let comment = is_comment(line);

            let line = self.lines.next_line()?;
            if comment {
                trace!(line = self.lines.line_number(), "skipping comment line");
                continue;
            }
            return Ok(Some((self.lines.line_number(), line)));
        }
        Ok(None)
    }
}

impl<S: LineSource> Iterator for BlockBody<'_, S> {
    type Item = StreamResult<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let item = self.next_data_line().transpose();
        if !matches!(item, Some(Ok(_))) {
            self.finished = true;
        }
        item
    }
}

/// Suppresses an empty line when it is the last line of its block.
///
/// Writers end every block with one blank separator line. Read back, that
/// line would decode to a phantom one-field row, so it is dropped. Empty lines
/// anywhere else are kept.
pub struct TrimTrailingBlank<I: Iterator> {
    inner: Peekable<I>,
}

impl<I> TrimTrailingBlank<I>
where
    I: Iterator<Item = StreamResult<(usize, String)>>,
{
    /// Wrap a line iterator.
    pub fn new(inner: I) -> Self {
        Self {
            inner: inner.peekable(),
        }
    }
}

impl<I> Iterator for TrimTrailingBlank<I>
where
    I: Iterator<Item = StreamResult<(usize, String)>>,
{
    type Item = StreamResult<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next()? {
            Ok((_, line)) if line.is_empty() && self.inner.peek().is_none() => None,
            item => Some(item),
        }
    }
}

/// One tagged block of a golden file.
///
/// Iterates the decoded rows of the block. The block borrows the reader it
/// came from; rows left unread are discarded when the reader advances.
///
/// # Example
///
/// ```rust
/// use golden_stream::GoldenReader;
///
/// let mut reader = GoldenReader::from_text("-- !qt_1 --\n1,foo\n2,bar\n\n");
/// let block = reader.next_block().unwrap().unwrap();
/// assert_eq!(block.tag(), "qt_1");
///
/// let rows = block.collect_rows().unwrap();
/// assert_eq!(rows, vec![vec!["1", "foo"], vec!["2", "bar"]]);
/// ```
pub struct Block<'a, S: LineSource> {
    tag: String,
    marker_line: usize,
    lines: TrimTrailingBlank<BlockBody<'a, S>>,
    codec: RowCodec,
}

impl<'a, S: LineSource> Block<'a, S> {
    pub(crate) fn new(
        tag: String,
        marker_line: usize,
        lines: &'a mut Lookahead<S>,
        codec: RowCodec,
    ) -> Self {
        Self {
            tag,
            marker_line,
            lines: TrimTrailingBlank::new(BlockBody::new(lines)),
            codec,
        }
    }

    /// Tag from the block's marker line.
    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Line number of the block's marker line.
    #[inline]
    pub fn marker_line(&self) -> usize {
        self.marker_line
    }

    pub(crate) fn codec(&self) -> RowCodec {
        self.codec
    }

    /// Decode every remaining row.
    pub fn collect_rows(self) -> StreamResult<Vec<Row>> {
        self.collect()
    }

    /// Skip every remaining row without decoding it. Returns how many were
    /// skipped.
    pub fn drain(self) -> StreamResult<usize> {
        let mut skipped = 0;
        for line in self.lines {
            line?;
            skipped += 1;
        }
        Ok(skipped)
    }
}

impl<S: LineSource> Iterator for Block<'_, S> {
    type Item = StreamResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.lines.next()?;
        Some(item.and_then(|(number, line)| Ok(self.codec.decode_row_at(&line, number)?)))
    }
}

impl<S: LineSource> std::fmt::Debug for Block<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Block")
            .field("tag", &self.tag)
            .field("marker_line", &self.marker_line)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StreamError;
    use crate::source::MemoryLines;

    fn lookahead(text: &str) -> Lookahead<MemoryLines> {
        Lookahead::new(MemoryLines::from_text(text))
    }

    fn body_lines(lines: &mut Lookahead<MemoryLines>) -> Vec<String> {
        BlockBody::new(lines).map(|r| r.unwrap().1).collect()
    }

    fn trimmed(lines: &[&str]) -> Vec<String> {
        let items = lines
            .iter()
            .enumerate()
            .map(|(i, l)| Ok((i + 1, l.to_string())));
        TrimTrailingBlank::new(items).map(|r| r.unwrap().1).collect()
    }

    // ==================== BlockBody tests ====================

    #[test]
    fn test_body_stops_at_marker_without_consuming() {
        let mut lines = lookahead("1,a\n2,b\n-- !next --\n3,c");
        assert_eq!(body_lines(&mut lines), vec!["1,a", "2,b"]);
        assert_eq!(lines.peek().unwrap(), "-- !next --");
    }

    #[test]
    fn test_body_skips_interleaved_comments() {
        let mut lines = lookahead("1,a\n-- note\n2,b\n");
        assert_eq!(body_lines(&mut lines), vec!["1,a", "2,b"]);
    }

    #[test]
    fn test_body_ends_at_input_end() {
        let mut lines = lookahead("x\ny");
        assert_eq!(body_lines(&mut lines), vec!["x", "y"]);
        assert!(!lines.has_next().unwrap());
    }

    #[test]
    fn test_body_keeps_empty_lines() {
        let mut lines = lookahead("\na\n\n");
        assert_eq!(body_lines(&mut lines), vec!["", "a", ""]);
    }

    #[test]
    fn test_body_reports_line_numbers() {
        let mut lines = lookahead("a\n-- c\nb");
        let numbers: Vec<usize> = BlockBody::new(&mut lines).map(|r| r.unwrap().0).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn test_body_treats_dash_data_as_comment() {
        // Known ambiguity: a data row starting with "-- " reads as a comment.
        let mut lines = lookahead("-- looks like data\n1,x");
        assert_eq!(body_lines(&mut lines), vec!["1,x"]);
    }

    #[test]
    fn test_body_only_marker() {
        let mut lines = lookahead("-- !tag --");
        assert!(body_lines(&mut lines).is_empty());
        assert!(lines.has_next().unwrap());
    }

    // ==================== TrimTrailingBlank tests ====================

    #[test]
    fn test_trailing_blank_removed() {
        assert_eq!(trimmed(&["a", "b", ""]), vec!["a", "b"]);
    }

    #[test]
    fn test_only_last_blank_removed() {
        assert_eq!(trimmed(&["a", "", ""]), vec!["a", ""]);
    }

    #[test]
    fn test_inner_blank_kept() {
        assert_eq!(trimmed(&["", "a"]), vec!["", "a"]);
    }

    #[test]
    fn test_single_blank_block_is_empty() {
        assert!(trimmed(&[""]).is_empty());
    }

    #[test]
    fn test_no_blank_unchanged() {
        assert_eq!(trimmed(&["a"]), vec!["a"]);
    }

    #[test]
    fn test_blank_before_error_is_kept() {
        let items = vec![Ok((1, String::new())), Err(StreamError::Exhausted)];
        let mut trimmed = TrimTrailingBlank::new(items.into_iter());
        assert_eq!(trimmed.next().unwrap().unwrap().1, "");
        assert!(trimmed.next().unwrap().is_err());
    }

    // ==================== Block tests ====================

    #[test]
    fn test_block_decodes_rows() {
        let mut lines = lookahead("1,foo\n2,\"b,ar\"\n\n-- !other --");
        let block = Block::new("t".to_string(), 1, &mut lines, RowCodec::default());
        let rows = block.collect_rows().unwrap();
        assert_eq!(rows, vec![vec!["1", "foo"], vec!["2", "b,ar"]]);
        assert_eq!(lines.peek().unwrap(), "-- !other --");
    }

    #[test]
    fn test_block_inner_empty_line_is_one_empty_field() {
        let mut lines = lookahead("\n1\n\n");
        let block = Block::new("t".to_string(), 1, &mut lines, RowCodec::default());
        let rows = block.collect_rows().unwrap();
        assert_eq!(rows, vec![vec![""], vec!["1"]]);
    }

    #[test]
    fn test_block_decode_error_names_line() {
        let mut lines = lookahead("ok\n\"bad\n");
        let block = Block::new("t".to_string(), 1, &mut lines, RowCodec::default());
        let err = block.collect_rows().unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_block_drain_counts_rows() {
        let mut lines = lookahead("a\n-- c\nb\n\n-- !next --\n");
        let block = Block::new("t".to_string(), 1, &mut lines, RowCodec::default());
        assert_eq!(block.drain().unwrap(), 2);
        assert_eq!(lines.peek().unwrap(), "-- !next --");
    }

    #[test]
    fn test_block_accessors() {
        let mut lines = lookahead("");
        let block = Block::new("qt_9".to_string(), 42, &mut lines, RowCodec::default());
        assert_eq!(block.tag(), "qt_9");
        assert_eq!(block.marker_line(), 42);
        assert!(format!("{:?}", block).contains("qt_9"));
    }
}
