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

//! CSV row codec for golden result files.
//!
//! Golden files store one result row per line. This crate converts between a
//! row of values and that single line, using the MySQL flavour of CSV: comma
//! separated, quoted only when a field contains the delimiter, a quote or a
//! line break, with embedded quotes doubled.
//!
//! # Quick Start
//!
//! ```rust
//! use golden_csv::{decode_row, encode_row};
//!
//! let line = encode_row([&"1" as &dyn std::fmt::Display, &2.5, &"a \"b\""]).unwrap();
//! assert_eq!(line, "1,2.5,\"a \"\"b\"\"\"");
//!
//! let row = decode_row(&line).unwrap();
//! assert_eq!(row, vec!["1", "2.5", "a \"b\""]);
//! ```
//!
//! # Empty Lines
//!
//! An empty line decodes to a row holding one empty field. A row is never
//! decoded as "no fields", so a one-column result whose value is the empty
//! string survives a round trip.
//!
//! ```rust
//! use golden_csv::decode_row;
//!
//! assert_eq!(decode_row("").unwrap(), vec![String::new()]);
//! ```

mod codec;
mod error;

pub use codec::{decode_row, encode_row, CodecConfig, Row, RowCodec};
pub use error::{CsvError, Result};
