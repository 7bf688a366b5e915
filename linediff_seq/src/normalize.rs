use std::borrow::Cow;

use xxhash_rust::xxh3::xxh3_64;

use crate::model::MatchOptions;

/// Apply the comparison switches to one raw token.
///
/// Order: trailing line terminators, then whitespace, then case.
pub fn normalize_token<'t>(raw: &'t str, options: &MatchOptions) -> Cow<'t, str> {
    if options.is_exact() {
        return Cow::Borrowed(raw);
    }

    let mut output = Cow::Borrowed(raw);

    if options.ignore_line_ending {
        let trimmed = output.trim_end_matches(['\r', '\n']);
        if trimmed.len() != output.len() {
            output = Cow::Owned(trimmed.to_string());
        }
    }

    if options.ignore_whitespace && output.chars().any(char::is_whitespace) {
        output = Cow::Owned(output.chars().filter(|ch| !ch.is_whitespace()).collect());
    }

    if options.ignore_case {
        output = Cow::Owned(output.to_lowercase());
    }

    output
}

/// Derive the comparison key of an already-normalized token.
///
/// Matching compares keys only, so a key collision makes two different
/// tokens equal.
pub fn derive_token_key(normalized: &str) -> u64 {
    xxh3_64(normalized.as_bytes())
}

/// Normalize then key a raw token.
pub fn token_key(raw: &str, options: &MatchOptions) -> u64 {
    derive_token_key(&normalize_token(raw, options))
}
