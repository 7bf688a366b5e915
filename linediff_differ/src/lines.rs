/// Split text on `\n` the way sessions expect it.
///
/// `\r` stays on its token. Text ending with `\n` yields a trailing empty
/// token; text without one does not, which is how a missing terminator on the
/// last line is detected later. Empty text yields a single empty token.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

/// Slice with Python-style indices: negatives count from the end, `end`
/// defaults to the length, both are clamped, and `end < start` is empty.
pub fn slice_by_index<T>(items: &[T], start: isize, end: Option<isize>) -> &[T] {
    let len = isize::try_from(items.len()).unwrap_or(isize::MAX);
    let resolve = |idx: isize| {
        if idx < 0 {
            (idx + len).max(0)
        } else {
            idx.min(len)
        }
    };

    let start = resolve(start);
    let end = resolve(end.unwrap_or(len)).max(start);
    &items[start as usize..end as usize]
}

/// Position just past the last token when that token lacks a terminator
/// under the [`split_lines`] convention, `None` when terminated or empty.
pub(crate) fn no_eol_at_eof(lines: &[String]) -> Option<usize> {
    match lines.last() {
        Some(last) if !last.is_empty() => Some(lines.len()),
        _ => None,
    }
}
