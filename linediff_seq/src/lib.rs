//! Sequence alignment core for line-oriented diffs.
//!
//! This crate provides:
//! - a matcher (`SequenceMatcher`) that finds maximal matching blocks between
//!   two token sequences, with junk classification and popular-token pruning
//! - an opcode builder (`opcodes_from_blocks`) producing a gapless edit script
//! - a hunk grouper (`group_opcodes`) that trims unchanged runs to a context
//!   window
//!
//! Tokens are compared by a 64-bit xxh3 key derived from the normalized token
//! text (see [`MatchOptions`]). Equal keys mean equal tokens; text is not
//! re-checked, so a key collision would pair two different lines.
//!
//! # Example
//!
//! ```rust
//! use linediff_seq::{Opcode, SequenceMatcher, Tag};
//!
//! let old = ["apples", "oranges", "kiwis", "carrots"];
//! let new = ["apples", "kiwis", "carrots", "grapefruits"];
//! let matcher = SequenceMatcher::new(&old, &new);
//! assert_eq!(
//!     matcher.opcodes(),
//!     &[
//!         Opcode::new(Tag::Equal, 0, 1, 0, 1),
//!         Opcode::new(Tag::Delete, 1, 2, 1, 1),
//!         Opcode::new(Tag::Equal, 2, 4, 1, 3),
//!         Opcode::new(Tag::Insert, 4, 4, 3, 4),
//!     ]
//! );
//! ```

mod classify;
mod error;
mod hunks;
mod matcher;
mod model;
mod normalize;
mod opcodes;
mod sequence;

pub use classify::{BlankLines, NoJunk, TokenClassifier};
pub use error::ContextSizeError;
pub use hunks::group_opcodes;
pub use matcher::{SequenceMatcher, ratio_from_matches};
pub use model::{
    ContextSize, DEFAULT_CONTEXT_LINES, Hunk, MatchOptions, MatchingBlock, Opcode, Tag,
};
pub use normalize::{derive_token_key, normalize_token, token_key};
pub use opcodes::opcodes_from_blocks;
pub use sequence::{POPULAR_MIN_LEN, popular_threshold};
