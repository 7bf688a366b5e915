//! Cached diff sessions producing grouped opcodes for renderers.
//!
//! A [`Differ`] owns an old and a new line sequence plus [`DiffOptions`], and
//! memoizes everything derived from them. Two groupings are available:
//! - [`Differ::grouped_opcodes`] over the raw sequences
//! - [`Differ::grouped_opcodes_gnu`], which also reports which side lacks a
//!   trailing newline so a renderer can print the usual marker
//!
//! Primary entrypoints:
//! - [`Differ`]
//! - [`DiffOptions`] / [`OptionsPatch`]
//! - [`split_lines`]
//!
//! # Example
//!
//! ```rust
//! use linediff_differ::{DiffOptions, Differ};
//!
//! let differ = Differ::from_text("a\nb\nc\n", "a\nx\nc\n", DiffOptions::default());
//! let hunks = differ.grouped_opcodes();
//! assert_eq!(hunks.len(), 1);
//! assert_eq!(differ.statistics().inserted, 1);
//! ```

mod error;
mod lines;
mod options;
mod session;
mod stats;

pub use error::OptionsError;
pub use lines::{slice_by_index, split_lines};
pub use linediff_seq::{ContextSize, Hunk, MatchOptions, Opcode, Tag};
pub use options::{DiffOptions, OptionsPatch};
pub use session::{Differ, EolAwareHunks};
pub use stats::DiffStatistics;

#[cfg(test)]
mod tests;
