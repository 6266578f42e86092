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

//! Integration tests for golden-stream

use golden_stream::{
    check_block, check_output, GoldenReader, GoldenReaderConfig, GoldenWriter, LineSource,
    MemoryLines, ReaderLines, StreamError,
};
use golden_test::fixtures::{self, builders::GoldenTextBuilder};
use golden_test::rows;
use std::io::Cursor;

// ==================== Fixture Tests ====================

#[test]
fn test_all_fixtures_read_back() {
    for fixture in fixtures::all() {
        let mut reader = GoldenReader::from_text(&fixture.text);
        let blocks = reader.read_all().unwrap();
        assert_eq!(blocks, fixture.blocks, "fixture {}", fixture.name);
    }
}

#[test]
fn test_all_fixtures_through_buffered_reader() {
    for fixture in fixtures::all() {
        let mut reader = GoldenReader::from_reader(
            Cursor::new(fixture.text.as_bytes()),
            GoldenReaderConfig::default(),
        );
        let blocks = reader.read_all().unwrap();
        assert_eq!(blocks, fixture.blocks, "fixture {}", fixture.name);
    }
}

#[test]
fn test_every_fixture_block_found_by_tag() {
    for fixture in fixtures::all() {
        for (index, (tag, expected)) in fixture.blocks.iter().enumerate() {
            // Repeated tags resolve to their first occurrence.
            if fixture.blocks[..index].iter().any(|(t, _)| t == tag) {
                continue;
            }
            let mut reader = GoldenReader::from_text(&fixture.text);
            let block = reader.find_block(tag).unwrap().unwrap();
            assert_eq!(&block.collect_rows().unwrap(), expected, "{}:{}", fixture.name, tag);
        }
    }
}

// ==================== Tag Skipping ====================

#[test]
fn test_tag_skipping_drains_earlier_blocks() {
    let fixture = fixtures::three_blocks();
    let mut reader = GoldenReader::from_text(&fixture.text);

    assert!(reader.has_next_tag_block("c").unwrap());
    let block = reader.next_block().unwrap().unwrap();
    assert_eq!(block.tag(), "c");
    assert_eq!(block.collect_rows().unwrap(), rows(&[&["4", "c"]]));

    // a and b are gone for good.
    assert!(!reader.has_next_tag_block("a").unwrap());
    assert!(!reader.has_next_tag_block("b").unwrap());
}

#[test]
fn test_tag_lookup_in_large_file() {
    let mut builder = GoldenTextBuilder::new().preamble();
    for i in 0..500 {
        let row_a = i.to_string();
        let row_b = format!("value {}", i);
        builder = builder.block(
            &format!("q{}", i),
            &[&[row_a.as_str(), row_b.as_str()], &[row_a.as_str(), ""]],
        );
    }
    let text = builder.build();

    let mut reader = GoldenReader::from_text(&text);
    let block = reader.find_block("q499").unwrap().unwrap();
    assert_eq!(
        block.collect_rows().unwrap(),
        rows(&[&["499", "value 499"], &["499", ""]])
    );
    assert!(reader.next_block().unwrap().is_none());
}

// ==================== Writer Round Trip ====================

#[test]
fn test_writer_output_reads_back_exactly() {
    let written_rows = rows(&[&["1", "foo"], &[""], &["", ""], &["x,y", "\"q\""]]);

    let writer = GoldenWriter::new(Vec::new());
    writer.write(&written_rows, "mixed").unwrap();
    writer.write(rows(&[&["tail"]]), "after").unwrap();
    let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();

    let mut reader = GoldenReader::from_text(&text);
    let blocks = reader.read_all().unwrap();
    assert_eq!(blocks[0], ("mixed".to_string(), written_rows));
    assert_eq!(blocks[1], ("after".to_string(), rows(&[&["tail"]])));
}

#[test]
fn test_trailing_empty_row_survives_round_trip() {
    let written_rows = rows(&[&["a"], &[""]]);

    let writer = GoldenWriter::new(Vec::new());
    writer.write(&written_rows, "q").unwrap();
    let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();

    let mut reader = GoldenReader::from_text(&text);
    let block = reader.find_block("q").unwrap().unwrap();
    assert_eq!(block.collect_rows().unwrap(), written_rows);
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regression").join("select.out");

    let writer = GoldenWriter::create(&path).unwrap();
    writer.write(vec![vec![1, 10], vec![2, 20]], "select_1").unwrap();
    writer.write(vec![vec!["only"]], "select_2").unwrap();
    writer.close().unwrap();

    let mut reader = GoldenReader::open(&path).unwrap();
    let block = reader.find_block("select_2").unwrap().unwrap();
    assert_eq!(block.marker_line(), 6);
    assert_eq!(block.collect_rows().unwrap(), rows(&[&["only"]]));
    reader.close().unwrap();
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = GoldenReader::open(dir.path().join("absent.out"));
    assert!(matches!(result, Err(StreamError::Io(_))));
}

// ==================== Known Edge Cases ====================

#[test]
fn test_data_row_starting_with_comment_prefix_is_lost() {
    // A value beginning with "-- " needs no CSV quoting, so its line is
    // indistinguishable from a comment and is skipped on read.
    let writer = GoldenWriter::new(Vec::new());
    writer
        .write(rows(&[&["-- looks like a comment"], &["kept"]]), "q")
        .unwrap();
    let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
    assert!(text.contains("\n-- looks like a comment\n"));

    let mut reader = GoldenReader::from_text(&text);
    let block = reader.find_block("q").unwrap().unwrap();
    assert_eq!(block.collect_rows().unwrap(), rows(&[&["kept"]]));
}

#[test]
fn test_marker_shaped_data_row_splits_block() {
    let text = "-- !q --\n1\n-- !inner --\n2\n\n";
    let mut reader = GoldenReader::from_text(text);
    let blocks = reader.read_all().unwrap();
    assert_eq!(
        blocks,
        vec![
            ("q".to_string(), rows(&[&["1"]])),
            ("inner".to_string(), rows(&[&["2"]])),
        ]
    );
}

#[test]
fn test_only_final_blank_line_is_dropped() {
    let text = "-- !q --\na\n\n\n";
    let mut reader = GoldenReader::from_text(text);
    let block = reader.next_block().unwrap().unwrap();
    assert_eq!(block.collect_rows().unwrap(), rows(&[&["a"], &[""]]));
}

#[test]
fn test_crlf_file_without_final_newline_keeps_last_block() {
    let text = "-- !a --\r\n1\r\n\r\n-- !b --\r";
    let expected = vec![
        ("a".to_string(), rows(&[&["1"]])),
        ("b".to_string(), Vec::new()),
    ];

    let mut buffered = GoldenReader::from_reader(Cursor::new(text), GoldenReaderConfig::default());
    assert_eq!(buffered.read_all().unwrap(), expected);

    let mut in_memory = GoldenReader::from_text(text);
    assert_eq!(in_memory.read_all().unwrap(), expected);
}

// ==================== Checking ====================

#[test]
fn test_check_against_golden_block() {
    let fixture = fixtures::single_block();
    let mut reader = GoldenReader::from_text(&fixture.text);

    let block = reader.find_block("qt_1").unwrap().unwrap();
    let actual = vec![vec!["1", "foo"], vec!["2", "bar"]];
    assert_eq!(check_block(block, actual, "qt_1").unwrap(), None);
}

#[test]
fn test_check_reports_changed_value() {
    let message = check_output(
        rows(&[&["1", "x"]]),
        rows(&[&["1", "y"]]),
        "select_1",
    )
    .unwrap()
    .unwrap();
    assert!(message.contains("select_1"));
    assert!(message.contains("1,x"));
    assert!(message.contains("1,y"));
}

// ==================== Line Sources ====================

struct WrappedSource {
    inner: MemoryLines,
}

impl LineSource for WrappedSource {
    fn read_line(&mut self) -> golden_stream::StreamResult<Option<(usize, String)>> {
        self.inner.read_line()
    }

    fn close(&mut self) -> golden_stream::StreamResult<()> {
        self.inner.close()
    }
}

#[test]
fn test_custom_line_source() {
    let source = WrappedSource {
        inner: MemoryLines::from_text("-- !q --\n1\n"),
    };
    let mut reader = GoldenReader::new(source);
    assert_eq!(reader.read_all().unwrap(), vec![("q".to_string(), rows(&[&["1"]]))]);
    reader.close().unwrap();
}

#[test]
fn test_boxed_line_source() {
    let source: Box<dyn LineSource> =
        Box::new(ReaderLines::new(Cursor::new("-- !q --\n1,2\n\n")));
    let mut reader = GoldenReader::new(source);
    let block = reader.next_block().unwrap().unwrap();
    assert_eq!(block.collect_rows().unwrap(), rows(&[&["1", "2"]]));
}

#[test]
fn test_fixture_preamble_matches_writer() {
    assert_eq!(
        golden_test::fixtures::builders::PREAMBLE,
        golden_stream::marker::DEFAULT_PREAMBLE
    );
}
