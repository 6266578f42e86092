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

//! Streaming Golden File Reader and Writer
//!
//! Golden files store the expected results of regression queries. Each file
//! is a sequence of tagged blocks of CSV rows:
//!
//! ```text
//! -- This file is automatically generated. ...
//! -- !qt_1 --
//! 1,foo
//! 2,bar
//!
//! -- !qt_2 --
//! 3,baz
//!
//! ```
//!
//! # Features
//!
//! - **Streaming**: Blocks are read one at a time; only one line of lookahead
//!   and the current block are ever pending
//! - **Tag Lookup**: Skip straight to a tagged block, draining the ones before it
//! - **Thread-safe Writing**: Concurrent writers never interleave blocks
//! - **Result Checking**: Compare expected and actual rows with a readable report
//!
//! # Reading
//!
//! ```rust
//! use golden_stream::GoldenReader;
//!
//! let text = "-- !qt_1 --\n1,foo\n2,bar\n\n-- !qt_2 --\n3,baz\n\n";
//! let mut reader = GoldenReader::from_text(text);
//!
//! let block = reader.find_block("qt_2").unwrap().unwrap();
//! assert_eq!(block.collect_rows().unwrap(), vec![vec!["3", "baz"]]);
//! ```
//!
//! # Writing and Checking
//!
//! ```rust
//! use golden_stream::{check_block, GoldenReader, GoldenWriter};
//!
//! let writer = GoldenWriter::new(Vec::new());
//! writer.write(vec![vec![1, 2], vec![3, 4]], "sums").unwrap();
//! let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
//!
//! let mut reader = GoldenReader::from_text(&text);
//! let expected = reader.find_block("sums").unwrap().unwrap();
//! let actual = vec![vec![1, 2], vec![3, 5]];
//!
//! let report = check_block(expected, actual, "sums").unwrap().unwrap();
//! assert!(report.contains("3,4"));
//! assert!(report.contains("3,5"));
//! ```

mod block;
mod check;
mod error;
mod lookahead;
pub mod marker;
mod reader;
mod source;
mod writer;

pub use block::{Block, BlockBody, TrimTrailingBlank};
pub use check::{check_block, check_output};
pub use error::{StreamError, StreamResult};
pub use lookahead::Lookahead;
pub use reader::{GoldenReader, GoldenReaderConfig};
pub use source::{FileLines, LineSource, MemoryLines, ReaderLines};
pub use writer::{GoldenWriter, WriterConfig};

/// Re-export codec types for convenience.
pub use golden_csv::{CodecConfig, CsvError, Row, RowCodec};
