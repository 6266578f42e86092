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

//! Comparison of expected and actual result rows.
//!
//! Rows are compared by their CSV encoding, so `1` and `"1"` are the same
//! value while `1.0` and `1` are not. The walk stops at the first difference.

use crate::block::Block;
use crate::error::StreamResult;
use crate::source::LineSource;
use golden_csv::RowCodec;
use std::fmt::Display;

/// Compare two row sequences position by position.
///
/// Returns `None` when both sequences hold the same rows, or a message naming
/// `label`, the 1-based row position and the CSV form of the rows involved.
///
/// # Example
///
/// ```rust
/// use golden_stream::check_output;
///
/// let expected = vec![vec!["1", "x"]];
/// let actual = vec![vec!["1", "y"]];
///
/// let message = check_output(expected, actual, "qt_1").unwrap().unwrap();
/// assert!(message.contains("1,x"));
/// assert!(message.contains("1,y"));
///
/// let same = check_output(vec![vec![1, 2]], vec![vec!["1", "2"]], "qt_2").unwrap();
/// assert!(same.is_none());
/// ```
pub fn check_output<E, ER, A, AR>(expected: E, actual: A, label: &str) -> StreamResult<Option<String>>
where
    E: IntoIterator<Item = ER>,
    ER: IntoIterator,
    ER::Item: Display,
    A: IntoIterator<Item = AR>,
    AR: IntoIterator,
    AR::Item: Display,
{
    compare(&RowCodec::default(), expected.into_iter().map(Ok), actual, label)
}

/// Compare a block read from a golden file against actual rows.
///
/// Expected rows that fail to decode are returned as errors rather than
/// reported as mismatches.
pub fn check_block<S, A, AR>(block: Block<'_, S>, actual: A, label: &str) -> StreamResult<Option<String>>
where
    S: LineSource,
    A: IntoIterator<Item = AR>,
    AR: IntoIterator,
    AR::Item: Display,
{
    let codec = block.codec();
    compare(&codec, block, actual, label)
}

fn compare<E, ER, A, AR>(
    codec: &RowCodec,
    expected: E,
    actual: A,
    label: &str,
) -> StreamResult<Option<String>>
where
    E: Iterator<Item = StreamResult<ER>>,
    ER: IntoIterator,
    ER::Item: Display,
    A: IntoIterator<Item = AR>,
    AR: IntoIterator,
    AR::Item: Display,
{
    let mut actual = actual.into_iter();
    let mut expected = expected;
    let mut position = 0usize;

    loop {
        position += 1;
        match (expected.next().transpose()?, actual.next()) {
            (None, None) => return Ok(None),
            (Some(expected_row), None) => {
                let expected_line = codec.encode_row(expected_row)?;
                return Ok(Some(format!(
                    "{}: row {} mismatch, actual is empty, but expected is: {}",
                    label, position, expected_line
                )));
            }
            (None, Some(actual_row)) => {
                let actual_line = codec.encode_row(actual_row)?;
                return Ok(Some(format!(
                    "{}: row {} mismatch, expected is empty, but actual is: {}",
                    label, position, actual_line
                )));
            }
            (Some(expected_row), Some(actual_row)) => {
                let expected_line = codec.encode_row(expected_row)?;
                let actual_line = codec.encode_row(actual_row)?;
                if expected_line != actual_line {
                    return Ok(Some(format!(
                        "{}: row {} mismatch.\nExpected: {}\nActual  : {}",
                        label, position, expected_line, actual_line
                    )));
                }
            }
        }
    }
}
