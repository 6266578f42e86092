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

//! Golden text fixtures paired with the blocks they must read back as.

pub mod builders;

use crate::rows;
use builders::GoldenTextBuilder;

/// A golden file text and the blocks a reader must produce from it.
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Short unique name.
    pub name: &'static str,
    /// Golden file content.
    pub text: String,
    /// Expected `(tag, rows)` in file order.
    pub blocks: Vec<(String, Vec<Vec<String>>)>,
}

impl Fixture {
    fn new(name: &'static str, text: String, blocks: Vec<(&str, Vec<Vec<String>>)>) -> Self {
        Self {
            name,
            text,
            blocks: blocks
                .into_iter()
                .map(|(tag, rows)| (tag.to_string(), rows))
                .collect(),
        }
    }

    /// Tags in file order.
    pub fn tags(&self) -> Vec<&str> {
        self.blocks.iter().map(|(tag, _)| tag.as_str()).collect()
    }
}

/// Every fixture.
pub fn all() -> Vec<Fixture> {
    vec![
        single_block(),
        three_blocks(),
        interleaved_comments(),
        empty_values(),
        quoted_values(),
        empty_blocks(),
        repeated_tags(),
        no_trailing_blank(),
        crlf_endings(),
    ]
}

/// The canonical one-block file.
pub fn single_block() -> Fixture {
    Fixture::new(
        "single_block",
        "-- !qt_1 --\n1,foo\n2,bar\n\n".to_string(),
        vec![("qt_1", rows(&[&["1", "foo"], &["2", "bar"]]))],
    )
}

/// Three blocks tagged a, b, c behind the generated-file preamble.
pub fn three_blocks() -> Fixture {
    let a = rows(&[&["1", "a"]]);
    let b = rows(&[&["2", "b"], &["3", "b"]]);
    let c = rows(&[&["4", "c"]]);
    Fixture::new(
        "three_blocks",
        GoldenTextBuilder::new()
            .preamble()
            .block_rows("a", &a)
            .block_rows("b", &b)
            .block_rows("c", &c)
            .build(),
        vec![("a", a), ("b", b), ("c", c)],
    )
}

/// Comment lines inside and between blocks.
pub fn interleaved_comments() -> Fixture {
    Fixture::new(
        "interleaved_comments",
        "-- leading comment\n-- !q --\n1,x\n-- note\n2,y\n\n-- between\n-- !r --\n-- first\n3,z\n\n"
            .to_string(),
        vec![
            ("q", rows(&[&["1", "x"], &["2", "y"]])),
            ("r", rows(&[&["3", "z"]])),
        ],
    )
}

/// Empty lines and empty fields that are real data.
pub fn empty_values() -> Fixture {
    Fixture::new(
        "empty_values",
        "-- !blanks --\n\n1,\n,\n\"\"\n\n".to_string(),
        vec![("blanks", rows(&[&[""], &["1", ""], &["", ""], &[""]]))],
    )
}

/// Fields that need quoting.
pub fn quoted_values() -> Fixture {
    let quoted = rows(&[
        &["a,b", "plain"],
        &["say \"hi\"", ""],
        &[" leading space", "-- trailing"],
    ]);
    Fixture::new(
        "quoted_values",
        GoldenTextBuilder::new().block_rows("quoted", &quoted).build(),
        vec![("quoted", quoted)],
    )
}

/// Blocks without rows.
pub fn empty_blocks() -> Fixture {
    Fixture::new(
        "empty_blocks",
        "-- !none --\n\n-- !also_none --\n-- !one --\n1\n\n".to_string(),
        vec![
            ("none", Vec::new()),
            ("also_none", Vec::new()),
            ("one", rows(&[&["1"]])),
        ],
    )
}

/// The same tag used twice.
pub fn repeated_tags() -> Fixture {
    Fixture::new(
        "repeated_tags",
        "-- !q --\n1\n\n-- !q --\n2\n\n".to_string(),
        vec![("q", rows(&[&["1"]])), ("q", rows(&[&["2"]]))],
    )
}

/// A file whose last block has no separator line.
pub fn no_trailing_blank() -> Fixture {
    Fixture::new(
        "no_trailing_blank",
        "-- !q --\n1,a\n2,b".to_string(),
        vec![("q", rows(&[&["1", "a"], &["2", "b"]]))],
    )
}

/// Windows line endings.
pub fn crlf_endings() -> Fixture {
    Fixture::new(
        "crlf_endings",
        "-- header\r\n-- !q --\r\n1,a\r\n\r\n".to_string(),
        vec![("q", rows(&[&["1", "a"]]))],
    )
}
