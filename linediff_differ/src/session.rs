use std::cell::OnceCell;
use std::cmp::Ordering;

use linediff_seq::{Hunk, Opcode, SequenceMatcher, Tag};
use log::debug;
use serde::Serialize;

use crate::lines::{no_eol_at_eof, slice_by_index, split_lines};
use crate::options::{DiffOptions, OptionsPatch};
use crate::stats::{DiffStatistics, build_statistics};

/// Helper tokens appended to both sides for the EOL-sensitive grouping, so
/// the script always ends in an unchanged run.
const EOF_HELPER_LINES: usize = 4;

/// Private-use sentinel that no real line is expected to equal.
const EOF_HELPER_TOKEN: &str = "\u{F8FF}\u{F8FE}eof\u{F8FE}\u{F8FF}";

/// Hunks for GNU-style output plus the missing-terminator markers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EolAwareHunks {
    pub hunks: Vec<Hunk>,
    /// Old-side line count when its last line has no terminator.
    pub old_no_eol_at_eof: Option<usize>,
    /// New-side line count when its last line has no terminator.
    pub new_no_eol_at_eof: Option<usize>,
}

/// Everything derived from one `(old, new, options)` snapshot.
///
/// Built as a unit and dropped as a unit; sub-results fill in lazily but
/// always from the same snapshot.
#[derive(Debug, Clone)]
struct SessionCache {
    generation: u64,
    old_new_comparison: Ordering,
    old_no_eol_at_eof: Option<usize>,
    new_no_eol_at_eof: Option<usize>,
    grouped: OnceCell<Vec<Hunk>>,
    grouped_gnu: OnceCell<EolAwareHunks>,
    ratio: OnceCell<f64>,
}

/// Diff session over an old and a new line sequence.
///
/// Setters only invalidate cached results when the value actually changes.
/// Reads recompute lazily after an invalidation.
#[derive(Debug, Clone)]
pub struct Differ {
    old: Vec<String>,
    new: Vec<String>,
    options: DiffOptions,
    generation: u64,
    cache: OnceCell<SessionCache>,
}

impl Differ {
    /// Session over two line sequences; nothing is computed until read.
    pub fn new(old: Vec<String>, new: Vec<String>, options: DiffOptions) -> Self {
        Self {
            old,
            new,
            options,
            generation: 0,
            cache: OnceCell::new(),
        }
    }

    /// Session over two texts split with [`split_lines`].
    pub fn from_text(old: &str, new: &str, options: DiffOptions) -> Self {
        Self::new(split_lines(old), split_lines(new), options)
    }

    /// Replace the old lines.
    pub fn set_old(&mut self, old: Vec<String>) -> &mut Self {
        if self.old != old {
            self.old = old;
            self.invalidate();
        }
        self
    }

    /// Replace the new lines.
    pub fn set_new(&mut self, new: Vec<String>) -> &mut Self {
        if self.new != new {
            self.new = new;
            self.invalidate();
        }
        self
    }

    /// Replace the options wholesale.
    pub fn set_options(&mut self, options: DiffOptions) -> &mut Self {
        if self.options != options {
            self.options = options;
            self.invalidate();
        }
        self
    }

    /// Apply a partial option update on top of the current options.
    pub fn merge_options(&mut self, patch: &OptionsPatch) -> &mut Self {
        let merged = self.options.merge(patch);
        self.set_options(merged)
    }

    /// Current options, including merged patches.
    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Full old-side sequence.
    pub fn old_lines(&self) -> &[String] {
        &self.old
    }

    /// Full new-side sequence.
    pub fn new_lines(&self) -> &[String] {
        &self.new
    }

    /// Old-side slice; see [`slice_by_index`] for index rules.
    pub fn old_range(&self, start: isize, end: Option<isize>) -> &[String] {
        slice_by_index(&self.old, start, end)
    }

    /// New-side slice; see [`slice_by_index`] for index rules.
    pub fn new_range(&self, start: isize, end: Option<isize>) -> &[String] {
        slice_by_index(&self.new, start, end)
    }

    /// Number of effective invalidations since the session was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Old compared to new: shorter first, then line by line.
    pub fn old_new_comparison(&self) -> Ordering {
        self.finalize().old_new_comparison
    }

    /// True when old and new are equal line for line, ignoring options.
    pub fn is_identical(&self) -> bool {
        self.old_new_comparison() == Ordering::Equal
    }

    /// Hunks over the raw sequences.
    pub fn grouped_opcodes(&self) -> &[Hunk] {
        let cache = self.finalize();
        cache.grouped.get_or_init(|| {
            if self.full_context_applies(cache) {
                return full_context_hunks(self.old.len(), self.new.len());
            }
            SequenceMatcher::new(&self.old, &self.new)
                .with_options(self.options.match_options())
                .grouped_opcodes(self.options.context)
        })
    }

    /// Hunks for output that marks a missing newline at end of file.
    pub fn grouped_opcodes_gnu(&self) -> &EolAwareHunks {
        let cache = self.finalize();
        cache.grouped_gnu.get_or_init(|| {
            let hunks = if self.full_context_applies(cache) {
                full_context_hunks(self.old.len(), self.new.len())
            } else {
                self.compute_gnu_hunks()
            };
            EolAwareHunks {
                hunks,
                old_no_eol_at_eof: cache.old_no_eol_at_eof,
                new_no_eol_at_eof: cache.new_no_eol_at_eof,
            }
        })
    }

    /// Whole-sequence similarity in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        let cache = self.finalize();
        *cache.ratio.get_or_init(|| {
            SequenceMatcher::new(&self.old, &self.new)
                .with_options(self.options.match_options())
                .ratio()
        })
    }

    /// Line counts derived from [`Self::grouped_opcodes`].
    pub fn statistics(&self) -> DiffStatistics {
        build_statistics(self.grouped_opcodes(), self.old.len())
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.cache = OnceCell::new();
        debug!("diff session invalidated (generation {})", self.generation);
    }

    fn finalize(&self) -> &SessionCache {
        let cache = self.cache.get_or_init(|| {
            debug!(
                "rebuilding diff session cache (generation {}, old {} lines, new {} lines)",
                self.generation,
                self.old.len(),
                self.new.len()
            );
            SessionCache {
                generation: self.generation,
                old_new_comparison: compare_sequences(&self.old, &self.new),
                old_no_eol_at_eof: no_eol_at_eof(&self.old),
                new_no_eol_at_eof: no_eol_at_eof(&self.new),
                grouped: OnceCell::new(),
                grouped_gnu: OnceCell::new(),
                ratio: OnceCell::new(),
            }
        });
        debug_assert_eq!(cache.generation, self.generation);
        cache
    }

    fn full_context_applies(&self, cache: &SessionCache) -> bool {
        self.options.full_context_if_identical && cache.old_new_comparison == Ordering::Equal
    }

    fn compute_gnu_hunks(&self) -> Vec<Hunk> {
        let old_len = self.old.len();
        let new_len = self.new.len();
        let old = with_eof_helpers(&self.old);
        let new = with_eof_helpers(&self.new);

        SequenceMatcher::new(&old, &new)
            .with_options(self.options.match_options())
            .grouped_opcodes(self.options.context)
            .into_iter()
            .map(|hunk| {
                hunk.into_iter()
                    .filter_map(|op| clamp_opcode(op, old_len, new_len))
                    .collect::<Hunk>()
            })
            .filter(|hunk| !hunk.is_empty())
            .collect()
    }
}

fn compare_sequences(old: &[String], new: &[String]) -> Ordering {
    old.len().cmp(&new.len()).then_with(|| old.cmp(new))
}

fn full_context_hunks(old_len: usize, new_len: usize) -> Vec<Hunk> {
    if old_len == 0 && new_len == 0 {
        return Vec::new();
    }
    vec![vec![Opcode::new(Tag::Equal, 0, old_len, 0, new_len)]]
}

fn with_eof_helpers(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .map(String::as_str)
        .chain(std::iter::repeat_n(EOF_HELPER_TOKEN, EOF_HELPER_LINES))
        .collect()
}

/// Pull an opcode back inside the original lengths, dropping it when nothing
/// is left and retagging changes that lost one side.
fn clamp_opcode(op: Opcode, old_len: usize, new_len: usize) -> Option<Opcode> {
    let i1 = op.i1.min(old_len);
    let i2 = op.i2.min(old_len);
    let j1 = op.j1.min(new_len);
    let j2 = op.j2.min(new_len);

    if i1 == i2 && j1 == j2 {
        return None;
    }

    let tag = match op.tag {
        Tag::Equal => Tag::Equal,
        _ if i1 == i2 => Tag::Insert,
        _ if j1 == j2 => Tag::Delete,
        other => other,
    };
    Some(Opcode::new(tag, i1, i2, j1, j2))
}
