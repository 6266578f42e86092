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

//! Encode rows to single CSV lines and decode them back.

use crate::error::{CsvError, Result};
use std::fmt::Display;

/// One decoded CSV record.
pub type Row = Vec<String>;

/// Configuration for the row codec.
///
/// The defaults describe the MySQL flavour of CSV used by golden files:
/// comma separated, double-quote quoting applied only where needed, and
/// embedded quotes doubled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

/// Converts between rows and single CSV lines.
///
/// # Example
///
/// ```
/// use golden_csv::RowCodec;
///
/// let codec = RowCodec::default();
/// let line = codec.encode_row(["1", "hello, world"]).unwrap();
/// assert_eq!(line, "1,\"hello, world\"");
///
/// let row = codec.decode_row(&line).unwrap();
/// assert_eq!(row, vec!["1".to_string(), "hello, world".to_string()]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RowCodec {
    config: CodecConfig,
}

impl RowCodec {
    /// Create a codec with a custom configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// The configuration this codec was built with.
    #[inline]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Render each value with `Display` and join them into one CSV line.
    ///
    /// The returned line carries no terminator. A row with a single empty
    /// field is written as `""` so it cannot be confused with a blank line.
    /// A row with no fields encodes to the empty line.
    pub fn encode_row<I>(&self, values: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let fields: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();

        match fields.as_slice() {
            [] => return Ok(String::new()),
            [only] if only.is_empty() => {
                let quote = char::from(self.config.quote);
                return Ok(format!("{quote}{quote}"));
            }
            _ => {}
        }

        let estimated_size = fields.iter().map(|f| f.len() + 3).sum::<usize>();
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .quote_style(csv::QuoteStyle::Necessary)
            .double_quote(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::with_capacity(estimated_size));

        wtr.write_record(&fields)
            .map_err(|e| CsvError::Encode(format!("Failed to write CSV record: {}", e)))?;

        let mut buffer = wtr
            .into_inner()
            .map_err(|e| CsvError::Encode(format!("Failed to flush CSV writer: {}", e)))?;

        if buffer.last() == Some(&b'\n') {
            buffer.pop();
        }

        String::from_utf8(buffer).map_err(|_| CsvError::InvalidUtf8 {
            context: "encoded row".to_string(),
        })
    }

    /// Decode one line without position information.
    pub fn decode_row(&self, line: &str) -> Result<Row> {
        self.decode_row_at(line, 0)
    }

    /// Decode one line read from `line_number` (1-based) of a file.
    ///
    /// An empty line decodes to a single empty field, never to an empty row.
    /// Anything that is not exactly one well-formed record is a
    /// [`CsvError::ParseError`] naming the line.
    pub fn decode_row_at(&self, line: &str, line_number: usize) -> Result<Row> {
        if line.is_empty() {
            return Ok(vec![String::new()]);
        }

        check_quoting(line, &self.config).map_err(|reason| {
            CsvError::parse(line_number, format!("{} in line '{}'", reason, line))
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .quote(self.config.quote)
            .double_quote(true)
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());

        let mut records = rdr.records();
        let record = match records.next() {
            Some(record) => record.map_err(|e| {
                CsvError::parse(line_number, format!("{} in line '{}'", e, line))
            })?,
            None => {
                return Err(CsvError::parse(
                    line_number,
                    format!("no CSV record in line '{}'", line),
                ))
            }
        };

        if records.next().is_some() {
            return Err(CsvError::parse(
                line_number,
                format!("more than one CSV record in line '{}'", line),
            ));
        }

        Ok(record.iter().map(str::to_string).collect())
    }
}

/// Encode a row with the default codec.
pub fn encode_row<I>(values: I) -> Result<String>
where
    I: IntoIterator,
    I::Item: Display,
{
    RowCodec::default().encode_row(values)
}

/// Decode a line with the default codec.
pub fn decode_row(line: &str) -> Result<Row> {
    RowCodec::default().decode_row(line)
}

#[derive(Clone, Copy)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Reject quoted fields that are never closed or that carry text after
/// their closing quote. The csv reader accepts both silently.
fn check_quoting(line: &str, config: &CodecConfig) -> std::result::Result<(), &'static str> {
    let mut state = QuoteState::FieldStart;

    for &b in line.as_bytes() {
        state = match state {
            QuoteState::FieldStart if b == config.quote => QuoteState::Quoted,
            QuoteState::FieldStart if b == config.delimiter => QuoteState::FieldStart,
            QuoteState::FieldStart => QuoteState::Unquoted,
            QuoteState::Unquoted if b == config.delimiter => QuoteState::FieldStart,
            QuoteState::Unquoted => QuoteState::Unquoted,
            QuoteState::Quoted if b == config.quote => QuoteState::QuoteInQuoted,
            QuoteState::Quoted => QuoteState::Quoted,
            QuoteState::QuoteInQuoted if b == config.quote => QuoteState::Quoted,
            QuoteState::QuoteInQuoted if b == config.delimiter => QuoteState::FieldStart,
            QuoteState::QuoteInQuoted => {
                return Err("unexpected character after closing quote");
            }
        };
    }

    match state {
        QuoteState::Quoted => Err("unterminated quoted field"),
        _ => Ok(()),
    }
}
