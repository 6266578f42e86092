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

//! One line of lookahead over a [`LineSource`].

use crate::error::{StreamError, StreamResult};
use crate::source::LineSource;

/// Line source with peek support.
///
/// Holds at most one buffered line. `peek` is idempotent until the next
/// `next_line`. Both fail with [`StreamError::Exhausted`] when no line
/// remains, so callers check [`has_next`](Self::has_next) first.
///
/// # Example
///
/// ```rust
/// use golden_stream::{Lookahead, MemoryLines};
///
/// let mut lines = Lookahead::new(MemoryLines::from_text("line1\nline2"));
///
/// assert_eq!(lines.peek().unwrap(), "line1");
/// assert_eq!(lines.peek().unwrap(), "line1");
/// assert_eq!(lines.next_line().unwrap(), "line1");
/// assert_eq!(lines.next_line().unwrap(), "line2");
/// assert!(!lines.has_next().unwrap());
/// ```
pub struct Lookahead<S: LineSource> {
    source: S,
    peeked: Option<(usize, String)>,
    line_number: usize,
}

impl<S: LineSource> Lookahead<S> {
    /// Wrap a line source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            peeked: None,
            line_number: 0,
        }
    }

    /// Line number of the most recently consumed line (0 before the first).
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Whether another line is available.
    pub fn has_next(&mut self) -> StreamResult<bool> {
        self.fill()?;
        Ok(self.peeked.is_some())
    }

    /// Look at the next line without consuming it.
    pub fn peek(&mut self) -> StreamResult<&str> {
        self.fill()?;
        match &self.peeked {
            Some((_, line)) => Ok(line.as_str()),
            None => Err(StreamError::Exhausted),
        }
    }

    /// Consume and return the next line.
    pub fn next_line(&mut self) -> StreamResult<String> {
        self.fill()?;
        match self.peeked.take() {
            Some((number, line)) => {
                self.line_number = number;
                Ok(line)
            }
            None => Err(StreamError::Exhausted),
        }
    }

    /// Close the underlying source, discarding any buffered line.
    pub fn close(&mut self) -> StreamResult<()> {
        self.peeked = None;
        self.source.close()
    }

    fn fill(&mut self) -> StreamResult<()> {
        if self.peeked.is_none() {
            self.peeked = self.source.read_line()?;
        }
        Ok(())
    }
}

impl<S: LineSource> Iterator for Lookahead<S> {
    type Item = StreamResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.has_next() {
            Ok(true) => Some(self.next_line()),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
