use std::collections::{HashMap, HashSet};

use log::trace;

use crate::classify::TokenClassifier;
use crate::model::MatchOptions;
use crate::normalize::{derive_token_key, normalize_token};

/// Sequences shorter than this never have popular tokens pruned.
pub const POPULAR_MIN_LEN: usize = 200;

/// Occurrence count a token must exceed to be treated as popular.
///
/// Roughly 1% of the sequence length, plus one.
pub fn popular_threshold(len: usize) -> usize {
    len / 100 + 1
}

/// Comparison keys for every token of one side, in order.
pub(crate) fn key_tokens<S: AsRef<str>>(tokens: &[S], options: &MatchOptions) -> Vec<u64> {
    tokens
        .iter()
        .map(|token| derive_token_key(&normalize_token(token.as_ref(), options)))
        .collect()
}

/// Keys of the new side plus the position index used by the matcher.
#[derive(Debug, Clone, Default)]
pub(crate) struct IndexedSequence {
    pub keys: Vec<u64>,
    /// Key to ascending positions; junk and popular keys are absent.
    pub b2j: HashMap<u64, Vec<usize>>,
    pub junk: HashSet<u64>,
    pub popular: HashSet<u64>,
}

impl IndexedSequence {
    pub(crate) fn build<S: AsRef<str>>(
        tokens: &[S],
        options: &MatchOptions,
        classifier: &dyn TokenClassifier,
        auto_junk: bool,
    ) -> Self {
        let mut keys = Vec::with_capacity(tokens.len());
        let mut b2j: HashMap<u64, Vec<usize>> = HashMap::new();
        let mut junk = HashSet::new();
        let mut classified = HashSet::new();

        for (idx, token) in tokens.iter().enumerate() {
            let normalized = normalize_token(token.as_ref(), options);
            let key = derive_token_key(&normalized);
            if classified.insert(key) && classifier.is_junk(&normalized) {
                junk.insert(key);
            }
            keys.push(key);
            b2j.entry(key).or_default().push(idx);
        }

        for key in &junk {
            b2j.remove(key);
        }

        let mut popular = HashSet::new();
        if auto_junk && keys.len() >= POPULAR_MIN_LEN {
            let threshold = popular_threshold(keys.len());
            b2j.retain(|key, positions| {
                if positions.len() > threshold {
                    popular.insert(*key);
                    false
                } else {
                    true
                }
            });
            trace!(
                "pruned {} popular keys from index of {} tokens (threshold {threshold})",
                popular.len(),
                keys.len()
            );
        }

        Self {
            keys,
            b2j,
            junk,
            popular,
        }
    }

    pub(crate) fn is_junk(&self, key: u64) -> bool {
        self.junk.contains(&key)
    }
}
