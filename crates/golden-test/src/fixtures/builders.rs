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

//! Builder for golden file text.
//!
//! Produces exactly what the golden writer produces, plus the irregular
//! shapes (stray comments, raw lines) a writer never emits.

use golden_csv::encode_row;

/// Preamble line used by [`GoldenTextBuilder::preamble`].
pub const PREAMBLE: &str =
    "-- This file is automatically generated. You should know what you did if you want to edit this";

/// Builder for golden file text.
///
/// # Examples
///
/// ```
/// use golden_test::fixtures::builders::GoldenTextBuilder;
///
/// let text = GoldenTextBuilder::new()
///     .block("q", &[&["1", "a,b"]])
///     .raw("not,in,a,block")
///     .build();
///
/// assert_eq!(text, "-- !q --\n1,\"a,b\"\n\nnot,in,a,block\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct GoldenTextBuilder {
    lines: Vec<String>,
}

impl GoldenTextBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the generated-file preamble.
    pub fn preamble(self) -> Self {
        self.raw(PREAMBLE)
    }

    /// Adds a `-- ` comment line.
    pub fn comment(self, text: &str) -> Self {
        self.raw(&format!("-- {}", text))
    }

    /// Adds a marker line without rows or separator.
    pub fn marker(self, tag: &str) -> Self {
        self.raw(&format!("-- !{} --", tag))
    }

    /// Adds a full block: marker, one CSV line per row, blank separator.
    pub fn block(self, tag: &str, rows: &[&[&str]]) -> Self {
        self.block_rows(tag, rows)
    }

    /// Adds a full block from any rows of string-like fields.
    pub fn block_rows<R, F>(mut self, tag: &str, rows: &[R]) -> Self
    where
        R: AsRef<[F]>,
        F: AsRef<str>,
    {
        self = self.marker(tag);
        for row in rows {
            let fields = row.as_ref().iter().map(|f| AsRef::<str>::as_ref(f));
            let line = encode_row(fields).unwrap_or_else(|e| panic!("fixture row: {}", e));
            self.lines.push(line);
        }
        self.raw("")
    }

    /// Adds a line verbatim.
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Joins all lines, each terminated by `\n`.
    pub fn build(self) -> String {
        let mut text = String::new();
        for line in self.lines {
            text.push_str(&line);
            text.push('\n');
        }
        text
    }
}
