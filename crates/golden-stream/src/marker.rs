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

//! Line classification for the golden file format.
//!
//! ```text
//! -- This file is automatically generated. ...     <- comment
//! -- !q1 --                                        <- marker, tag "q1"
//! 1,foo                                            <- data
//! ```

/// Start of a marker line.
pub const MARKER_PREFIX: &str = "-- !";

/// End of a marker line.
pub const MARKER_SUFFIX: &str = " --";

/// Start of a comment line.
pub const COMMENT_PREFIX: &str = "-- ";

/// Comment written at the top of every generated golden file.
pub const DEFAULT_PREAMBLE: &str =
    "-- This file is automatically generated. You should know what you did if you want to edit this";

/// Whether `line` opens a block.
#[inline]
pub fn is_marker(line: &str) -> bool {
    line.starts_with(MARKER_PREFIX) && line.ends_with(MARKER_SUFFIX)
}

/// Whether `line` is a comment that carries no data.
///
/// Any data line that happens to start with `"-- "` is indistinguishable
/// from a comment and is skipped as one.
#[inline]
pub fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_PREFIX) && !is_marker(line)
}

/// Extract the trimmed tag from a marker line.
///
/// ```rust
/// use golden_stream::marker::parse_tag;
///
/// assert_eq!(parse_tag("-- !qt_1 --"), Some("qt_1"));
/// assert_eq!(parse_tag("-- !  spaced  --"), Some("spaced"));
/// assert_eq!(parse_tag("-- plain comment"), None);
/// ```
pub fn parse_tag(line: &str) -> Option<&str> {
    line.strip_prefix(MARKER_PREFIX)?
        .strip_suffix(MARKER_SUFFIX)
        .map(str::trim)
}

/// Build the marker line for `tag`.
#[inline]
pub fn marker_line(tag: &str) -> String {
    format!("{}{}{}", MARKER_PREFIX, tag, MARKER_SUFFIX)
}
