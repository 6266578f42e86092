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

//! Error types for the row codec.

use thiserror::Error;

/// Row codec error types.
///
/// # Examples
///
/// ```
/// use golden_csv::CsvError;
///
/// let err = CsvError::ParseError {
///     line: 7,
///     message: "unterminated quoted field".to_string(),
/// };
///
/// assert_eq!(
///     err.to_string(),
///     "CSV parse error at line 7: unterminated quoted field"
/// );
/// ```
#[derive(Debug, Error)]
pub enum CsvError {
    /// A data line is not exactly one CSV record.
    ///
    /// `line` is the 1-based line number in the source file, or 0 when the
    /// line was decoded without position information.
    #[error("CSV parse error at line {line}: {message}")]
    ParseError {
        /// Line number where the error occurred (1-based, 0 if unknown).
        line: usize,
        /// Detailed error message, including the offending line.
        message: String,
    },

    /// A row could not be rendered as a CSV line.
    ///
    /// # Examples
    ///
    /// ```
    /// use golden_csv::CsvError;
    ///
    /// let err = CsvError::Encode("buffer closed".to_string());
    /// assert_eq!(err.to_string(), "CSV encode error: buffer closed");
    /// ```
    #[error("CSV encode error: {0}")]
    Encode(String),

    /// Encoded output was not valid UTF-8.
    #[error("Invalid UTF-8 in {context}")]
    InvalidUtf8 {
        /// Where the invalid bytes were produced.
        context: String,
    },
}

impl CsvError {
    /// Create a parse error for a specific line.
    #[inline]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::ParseError { line, .. } if *line > 0 => Some(*line),
            _ => None,
        }
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CsvError>;
