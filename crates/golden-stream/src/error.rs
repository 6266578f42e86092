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

//! Error types for golden file reading and writing.
//!
//! # Error Categories
//!
//! - **I/O Errors**: Problems reading or writing the underlying file
//! - **Exhausted**: A line was requested from a source that has none left
//! - **CSV Errors**: A data line is not a single well-formed CSV record
//! - **Limits**: A line exceeds the configured maximum length
//! - **Writer Closed**: A block was written after the writer was closed
//!
//! Result mismatches are not errors; see [`check_output`](crate::check_output).
//!
//! # Example
//!
//! ```rust
//! use golden_stream::{GoldenReader, StreamError};
//!
//! let mut reader = GoldenReader::from_text("-- !q1 --\n\"broken\n");
//! let mut block = reader.next_block().unwrap().unwrap();
//!
//! match block.next() {
//!     Some(Err(StreamError::Csv(e))) => assert_eq!(e.line(), Some(2)),
//!     other => panic!("expected a CSV error, got {:?}", other.map(|r| r.is_ok())),
//! }
//! ```

use golden_csv::CsvError;
use thiserror::Error;

/// Errors that can occur while reading or writing golden files.
#[derive(Error, Debug)]
pub enum StreamError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line was requested after the source ran out.
    #[error("No more lines: the source is exhausted")]
    Exhausted,

    /// Line longer than the configured limit.
    #[error("Line {line} is {length} bytes long, exceeding the limit of {limit}")]
    LineTooLong {
        line: usize,
        length: usize,
        limit: usize,
    },

    /// A data line could not be decoded.
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// A block was written after `close()`.
    #[error("Golden writer is already closed")]
    WriterClosed,
}

impl StreamError {
    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::LineTooLong { line, .. } => Some(*line),
            Self::Csv(e) => e.line(),
            _ => None,
        }
    }
}

/// Result type for golden file operations.
pub type StreamResult<T> = Result<T, StreamError>;
