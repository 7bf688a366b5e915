use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContextSizeError;

/// Edit operation kind carried by an [`Opcode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Equal,
    Delete,
    Insert,
    Replace,
}

impl Tag {
    /// Lowercase name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Equal => "equal",
            Tag::Delete => "delete",
            Tag::Insert => "insert",
            Tag::Replace => "replace",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One edit operation: `old[i1..i2]` relates to `new[j1..j2]` under `tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Opcode {
    pub tag: Tag,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}

impl Opcode {
    /// Build an opcode from its tag and the two half-open ranges.
    pub fn new(tag: Tag, i1: usize, i2: usize, j1: usize, j2: usize) -> Self {
        Self {
            tag,
            i1,
            i2,
            j1,
            j2,
        }
    }

    /// Number of old-side tokens covered.
    pub fn old_len(&self) -> usize {
        self.i2 - self.i1
    }

    /// Number of new-side tokens covered.
    pub fn new_len(&self) -> usize {
        self.j2 - self.j1
    }

    /// True for unchanged runs.
    pub fn is_equal(&self) -> bool {
        self.tag == Tag::Equal
    }
}

/// Maximal run where `old[a + k] == new[b + k]` for `k` in `0..size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchingBlock {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

impl MatchingBlock {
    /// Block of `size` tokens starting at `old[a]` and `new[b]`.
    pub fn new(a: usize, b: usize, size: usize) -> Self {
        Self { a, b, size }
    }
}

/// Context-bounded group of opcodes suitable for independent display.
pub type Hunk = Vec<Opcode>;

/// Number of unchanged context lines kept around each change.
///
/// Serialized as a non-negative integer, or the string `"all"` for
/// [`ContextSize::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ContextRepr", into = "ContextRepr")]
pub enum ContextSize {
    Lines(usize),
    All,
}

impl Default for ContextSize {
    fn default() -> Self {
        ContextSize::Lines(DEFAULT_CONTEXT_LINES)
    }
}

/// Context used when no explicit value is configured.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

impl ContextSize {
    /// Line count used by the grouper; `All` saturates to `usize::MAX`.
    pub fn lines(self) -> usize {
        match self {
            ContextSize::Lines(n) => n,
            ContextSize::All => usize::MAX,
        }
    }

    fn from_signed(value: i64) -> Result<Self, ContextSizeError> {
        usize::try_from(value)
            .map(ContextSize::Lines)
            .map_err(|_| ContextSizeError::Negative(value))
    }
}

impl fmt::Display for ContextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextSize::Lines(n) => write!(f, "{n}"),
            ContextSize::All => f.write_str("all"),
        }
    }
}

impl FromStr for ContextSize {
    type Err = ContextSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(ContextSize::All);
        }
        match trimmed.parse::<i64>() {
            Ok(value) => ContextSize::from_signed(value),
            Err(_) => Err(ContextSizeError::Unrecognized(trimmed.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum ContextRepr {
    Count(i64),
    Keyword(String),
}

impl TryFrom<ContextRepr> for ContextSize {
    type Error = ContextSizeError;

    fn try_from(repr: ContextRepr) -> Result<Self, Self::Error> {
        match repr {
            ContextRepr::Count(value) => ContextSize::from_signed(value),
            ContextRepr::Keyword(word) => word.parse(),
        }
    }
}

impl From<ContextSize> for ContextRepr {
    fn from(size: ContextSize) -> Self {
        match size {
            ContextSize::Lines(n) => ContextRepr::Count(i64::try_from(n).unwrap_or(i64::MAX)),
            ContextSize::All => ContextRepr::Keyword("all".to_string()),
        }
    }
}

/// Token comparison switches applied before matching.
///
/// Two tokens compare equal when the 64-bit xxh3 keys of their normalized
/// text are equal. Distinct lines whose keys collide are treated as equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    pub ignore_case: bool,
    pub ignore_whitespace: bool,
    pub ignore_line_ending: bool,
}

impl MatchOptions {
    /// True when tokens are compared byte-for-byte.
    pub fn is_exact(&self) -> bool {
        !self.ignore_case && !self.ignore_whitespace && !self.ignore_line_ending
    }
}
