use linediff_seq::{Hunk, Tag};
use serde::Serialize;

/// Line counts summarizing a diff.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DiffStatistics {
    pub inserted: usize,
    pub deleted: usize,
    pub unmodified: usize,
    /// Share of old lines that were deleted or replaced, in `[0, 1]`.
    pub changed_ratio: f64,
}

pub(crate) fn build_statistics(hunks: &[Hunk], old_len: usize) -> DiffStatistics {
    let mut stats = DiffStatistics::default();

    for op in hunks.iter().flatten() {
        match op.tag {
            Tag::Equal => {}
            Tag::Insert => stats.inserted += op.new_len(),
            Tag::Delete => stats.deleted += op.old_len(),
            Tag::Replace => {
                stats.inserted += op.new_len();
                stats.deleted += op.old_len();
            }
        }
    }

    stats.unmodified = old_len.saturating_sub(stats.deleted);
    stats.changed_ratio = if old_len == 0 {
        if stats.inserted > 0 { 1.0 } else { 0.0 }
    } else {
        1.0 - stats.unmodified as f64 / old_len as f64
    };

    stats
}
