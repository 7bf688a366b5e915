/// Decides which token values are junk for the matcher.
///
/// Junk tokens never seed a matching block; they only extend a block that was
/// already found. The classifier sees normalized tokens.
pub trait TokenClassifier {
    fn is_junk(&self, token: &str) -> bool;
}

/// Classifier that never flags anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJunk;

impl TokenClassifier for NoJunk {
    fn is_junk(&self, _token: &str) -> bool {
        false
    }
}

impl<F> TokenClassifier for F
where
    F: Fn(&str) -> bool,
{
    fn is_junk(&self, token: &str) -> bool {
        self(token)
    }
}

/// Flags tokens that are empty or whitespace-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlankLines;

impl TokenClassifier for BlankLines {
    fn is_junk(&self, token: &str) -> bool {
        token.trim().is_empty()
    }
}
