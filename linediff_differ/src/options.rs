use linediff_seq::{ContextSize, MatchOptions};
use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

/// Options controlling comparison and grouping for a [`crate::Differ`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffOptions {
    /// Unchanged lines kept around each change.
    pub context: ContextSize,
    pub ignore_case: bool,
    pub ignore_whitespace: bool,
    /// Ignore trailing `\r` / `\n` left on tokens.
    pub ignore_line_ending: bool,
    /// Emit one hunk spanning everything when old and new are identical.
    pub full_context_if_identical: bool,
}

impl DiffOptions {
    /// Parse a JSON options document; missing keys keep their defaults.
    pub fn from_json(input: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Set the number of context lines around each change.
    pub fn with_context(mut self, context: ContextSize) -> Self {
        self.context = context;
        self
    }

    /// Set the context from user text such as `"5"` or `"all"`.
    pub fn with_context_str(self, context: &str) -> Result<Self, OptionsError> {
        Ok(self.with_context(context.parse()?))
    }

    /// Compare lines case-insensitively.
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Drop all whitespace before comparing lines.
    pub fn with_ignore_whitespace(mut self, ignore_whitespace: bool) -> Self {
        self.ignore_whitespace = ignore_whitespace;
        self
    }

    /// Ignore trailing line terminators when comparing lines.
    pub fn with_ignore_line_ending(mut self, ignore_line_ending: bool) -> Self {
        self.ignore_line_ending = ignore_line_ending;
        self
    }

    /// Return one whole-range hunk for identical inputs.
    pub fn with_full_context_if_identical(mut self, full_context_if_identical: bool) -> Self {
        self.full_context_if_identical = full_context_if_identical;
        self
    }

    /// Token comparison switches handed to the matcher.
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            ignore_case: self.ignore_case,
            ignore_whitespace: self.ignore_whitespace,
            ignore_line_ending: self.ignore_line_ending,
        }
    }

    /// Copy of these options with every field present in `patch` overridden.
    pub fn merge(&self, patch: &OptionsPatch) -> Self {
        Self {
            context: patch.context.unwrap_or(self.context),
            ignore_case: patch.ignore_case.unwrap_or(self.ignore_case),
            ignore_whitespace: patch.ignore_whitespace.unwrap_or(self.ignore_whitespace),
            ignore_line_ending: patch.ignore_line_ending.unwrap_or(self.ignore_line_ending),
            full_context_if_identical: patch
                .full_context_if_identical
                .unwrap_or(self.full_context_if_identical),
        }
    }
}

/// Partial option update; absent fields leave the current value alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsPatch {
    pub context: Option<ContextSize>,
    pub ignore_case: Option<bool>,
    pub ignore_whitespace: Option<bool>,
    pub ignore_line_ending: Option<bool>,
    pub full_context_if_identical: Option<bool>,
}

impl OptionsPatch {
    /// Parse a JSON patch; only keys present in the document are set.
    pub fn from_json(input: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(input)?)
    }

    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
