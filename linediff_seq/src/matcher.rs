use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;

use crate::classify::{NoJunk, TokenClassifier};
use crate::hunks::group_opcodes;
use crate::model::{ContextSize, Hunk, MatchOptions, MatchingBlock, Opcode};
use crate::normalize::token_key;
use crate::opcodes::opcodes_from_blocks;
use crate::sequence::{IndexedSequence, key_tokens};

/// Finds matching blocks between an old and a new token sequence.
///
/// The matcher borrows both sides. Keys, the new-side index, matching blocks
/// and opcodes are computed on first use and dropped whenever a side or a
/// setting changes.
pub struct SequenceMatcher<'a, S: AsRef<str> = String> {
    a: &'a [S],
    b: &'a [S],
    options: MatchOptions,
    auto_junk: bool,
    classifier: Box<dyn TokenClassifier + 'a>,
    a_keys: OnceCell<Vec<u64>>,
    b_index: OnceCell<IndexedSequence>,
    blocks: OnceCell<Vec<MatchingBlock>>,
    opcodes: OnceCell<Vec<Opcode>>,
}

impl<'a, S: AsRef<str>> SequenceMatcher<'a, S> {
    /// Exact comparison, no classifier, popular-token pruning enabled.
    pub fn new(a: &'a [S], b: &'a [S]) -> Self {
        Self {
            a,
            b,
            options: MatchOptions::default(),
            auto_junk: true,
            classifier: Box::new(NoJunk),
            a_keys: OnceCell::new(),
            b_index: OnceCell::new(),
            blocks: OnceCell::new(),
            opcodes: OnceCell::new(),
        }
    }

    /// Compare tokens after applying `options`.
    pub fn with_options(mut self, options: MatchOptions) -> Self {
        if self.options != options {
            self.options = options;
            self.a_keys = OnceCell::new();
            self.reset_new_side();
        }
        self
    }

    /// Enable or disable pruning of popular new-side tokens.
    pub fn with_auto_junk(mut self, auto_junk: bool) -> Self {
        if self.auto_junk != auto_junk {
            self.auto_junk = auto_junk;
            self.reset_new_side();
        }
        self
    }

    /// Use `classifier` to mark new-side junk tokens.
    pub fn with_classifier(mut self, classifier: impl TokenClassifier + 'a) -> Self {
        self.classifier = Box::new(classifier);
        self.reset_new_side();
        self
    }

    /// Replace both sides.
    pub fn set_seqs(&mut self, a: &'a [S], b: &'a [S]) {
        self.set_seq1(a);
        self.set_seq2(b);
    }

    /// Replace the old side. The new-side index is kept.
    pub fn set_seq1(&mut self, a: &'a [S]) {
        if std::ptr::eq(self.a, a) {
            return;
        }
        self.a = a;
        self.a_keys = OnceCell::new();
        self.reset_results();
    }

    /// Replace the new side and rebuild its index on next use.
    pub fn set_seq2(&mut self, b: &'a [S]) {
        if std::ptr::eq(self.b, b) {
            return;
        }
        self.b = b;
        self.reset_new_side();
    }

    /// Old-side tokens.
    pub fn old_seq(&self) -> &'a [S] {
        self.a
    }

    /// New-side tokens.
    pub fn new_seq(&self) -> &'a [S] {
        self.b
    }

    /// Active comparison switches.
    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Whether the classifier flagged `token` (after normalization) in the new side.
    pub fn is_junk(&self, token: &str) -> bool {
        self.index().is_junk(token_key(token, &self.options))
    }

    /// Whether `token` was pruned from the index for being too frequent.
    pub fn is_popular(&self, token: &str) -> bool {
        self.index()
            .popular
            .contains(&token_key(token, &self.options))
    }

    /// Longest matching block inside `old[a_lo..a_hi]` x `new[b_lo..b_hi]`.
    ///
    /// Among equally long blocks the one starting earliest in the old side
    /// wins, then earliest in the new side. Junk never seeds a block, but a
    /// found block is extended over equal neighbours, non-junk first and junk
    /// second. Returns `(a_lo, b_lo, 0)` when nothing matches.
    pub fn find_longest_match(
        &self,
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> MatchingBlock {
        let a = self.old_keys();
        let index = self.index();
        let b = &index.keys;

        let mut best_i = a_lo;
        let mut best_j = b_lo;
        let mut best_size = 0usize;

        // run length of the match ending at (i - 1, j), keyed by j
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        let mut next_j2len: HashMap<usize, usize> = HashMap::new();

        for (i, key) in a.iter().enumerate().take(a_hi).skip(a_lo) {
            next_j2len.clear();
            if let Some(positions) = index.b2j.get(key) {
                for &j in positions {
                    if j < b_lo {
                        continue;
                    }
                    if j >= b_hi {
                        break;
                    }
                    let run = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, run);
                    if run > best_size {
                        best_i = i + 1 - run;
                        best_j = j + 1 - run;
                        best_size = run;
                    }
                }
            }
            std::mem::swap(&mut j2len, &mut next_j2len);
        }

        for junk_pass in [false, true] {
            while best_i > a_lo
                && best_j > b_lo
                && index.is_junk(b[best_j - 1]) == junk_pass
                && a[best_i - 1] == b[best_j - 1]
            {
                best_i -= 1;
                best_j -= 1;
                best_size += 1;
            }
            while best_i + best_size < a_hi
                && best_j + best_size < b_hi
                && index.is_junk(b[best_j + best_size]) == junk_pass
                && a[best_i + best_size] == b[best_j + best_size]
            {
                best_size += 1;
            }
        }

        MatchingBlock::new(best_i, best_j, best_size)
    }

    /// Sorted, merged matching blocks closed by `(len(old), len(new), 0)`.
    pub fn matching_blocks(&self) -> &[MatchingBlock] {
        self.blocks.get_or_init(|| self.compute_matching_blocks())
    }

    /// Gapless edit script derived from [`Self::matching_blocks`].
    pub fn opcodes(&self) -> &[Opcode] {
        self.opcodes
            .get_or_init(|| opcodes_from_blocks(self.matching_blocks()))
    }

    /// Opcodes grouped into hunks; see [`group_opcodes`].
    pub fn grouped_opcodes(&self, context: ContextSize) -> Vec<Hunk> {
        group_opcodes(self.opcodes(), context)
    }

    /// Similarity in `[0, 1]`: twice the matched length over the total length.
    pub fn ratio(&self) -> f64 {
        let matches = self
            .matching_blocks()
            .iter()
            .map(|block| block.size)
            .sum::<usize>();
        ratio_from_matches(matches, self.a.len() + self.b.len())
    }

    /// Upper bound on [`Self::ratio`] that ignores token order.
    pub fn quick_ratio(&self) -> f64 {
        let mut available: HashMap<u64, isize> = HashMap::new();
        for key in &self.index().keys {
            *available.entry(*key).or_insert(0) += 1;
        }

        let mut matches = 0usize;
        for key in self.old_keys() {
            if let Some(count) = available.get_mut(key)
                && *count > 0
            {
                *count -= 1;
                matches += 1;
            }
        }
        ratio_from_matches(matches, self.a.len() + self.b.len())
    }

    /// Upper bound on [`Self::quick_ratio`] computed from lengths alone.
    pub fn real_quick_ratio(&self) -> f64 {
        let (la, lb) = (self.a.len(), self.b.len());
        ratio_from_matches(la.min(lb), la + lb)
    }

    fn compute_matching_blocks(&self) -> Vec<MatchingBlock> {
        let (la, lb) = (self.a.len(), self.b.len());

        let mut queue = vec![(0usize, la, 0usize, lb)];
        let mut found = Vec::new();
        while let Some((a_lo, a_hi, b_lo, b_hi)) = queue.pop() {
            let block = self.find_longest_match(a_lo, a_hi, b_lo, b_hi);
            if block.size == 0 {
                continue;
            }
            if a_lo < block.a && b_lo < block.b {
                queue.push((a_lo, block.a, b_lo, block.b));
            }
            if block.a + block.size < a_hi && block.b + block.size < b_hi {
                queue.push((block.a + block.size, a_hi, block.b + block.size, b_hi));
            }
            found.push(block);
        }
        found.sort_unstable();

        let mut merged: Vec<MatchingBlock> = Vec::with_capacity(found.len() + 1);
        for block in found {
            match merged.last_mut() {
                Some(prev) if prev.a + prev.size == block.a && prev.b + prev.size == block.b => {
                    prev.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged.push(MatchingBlock::new(la, lb, 0));
        merged
    }

    fn old_keys(&self) -> &[u64] {
        self.a_keys.get_or_init(|| key_tokens(self.a, &self.options))
    }

    fn index(&self) -> &IndexedSequence {
        self.b_index.get_or_init(|| {
            IndexedSequence::build(self.b, &self.options, &*self.classifier, self.auto_junk)
        })
    }

    fn reset_new_side(&mut self) {
        self.b_index = OnceCell::new();
        self.reset_results();
    }

    fn reset_results(&mut self) {
        self.blocks = OnceCell::new();
        self.opcodes = OnceCell::new();
    }
}

impl<S: AsRef<str>> fmt::Debug for SequenceMatcher<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceMatcher")
            .field("old_len", &self.a.len())
            .field("new_len", &self.b.len())
            .field("options", &self.options)
            .field("auto_junk", &self.auto_junk)
            .finish_non_exhaustive()
    }
}

/// `2 * matches / total`, defined as `1.0` when both sequences are empty.
pub fn ratio_from_matches(matches: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    2.0 * matches as f64 / total as f64
}
