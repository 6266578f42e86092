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

//! Shared test fixtures and utilities for the golden file crates.
//!
//! # Quick Start
//!
//! ```rust
//! use golden_test::fixtures;
//! use golden_test::fixtures::builders::GoldenTextBuilder;
//!
//! // Pre-built fixtures pair golden text with the blocks it must read as
//! let fixture = fixtures::single_block();
//! assert_eq!(fixture.blocks[0].0, "qt_1");
//!
//! // Build custom golden text
//! let text = GoldenTextBuilder::new()
//!     .preamble()
//!     .block("q1", &[&["1", "a"]])
//!     .comment("trailing note")
//!     .build();
//! assert!(text.contains("-- !q1 --\n1,a\n\n"));
//! ```

/// Canonical golden file fixtures.
pub mod fixtures;

pub use fixtures::{all, Fixture};

/// Owned rows from string literals.
pub fn rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|field| field.to_string()).collect())
        .collect()
}
