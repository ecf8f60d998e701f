//! The `logical:actual` composite state token.

use std::fmt;

/// Composite key identifying one rendered snapshot within one browsing
/// lineage. This is the only thing the server-state strategy sends to the
/// client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeToken {
    pub logical: String,
    pub actual: String,
}

impl CompositeToken {
    pub fn new(logical: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            logical: logical.into(),
            actual: actual.into(),
        }
    }

    /// Parses a postback token. Returns `None` for anything malformed —
    /// a garbled token is handled like an expired one, not an error.
    pub fn parse(raw: &str) -> Option<Self> {
        let (logical, actual) = raw.split_once(':')?;
        if logical.is_empty() || actual.is_empty() {
            return None;
        }
        Some(Self::new(logical, actual))
    }
}

impl fmt::Display for CompositeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.logical, self.actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let token = CompositeToken::new("j_id1", "j_id2");
        let parsed = CompositeToken::parse(&token.to_string()).unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn test_malformed_rejected() {
        assert_eq!(CompositeToken::parse("no-separator"), None);
        assert_eq!(CompositeToken::parse(":actual"), None);
        assert_eq!(CompositeToken::parse("logical:"), None);
        assert_eq!(CompositeToken::parse(""), None);
    }

    #[test]
    fn test_extra_separator_goes_to_actual() {
        // Logical ids never contain ':'; anything after the first one is the
        // actual id verbatim.
        let token = CompositeToken::parse("a:b:c").unwrap();
        assert_eq!(token.logical, "a");
        assert_eq!(token.actual, "b:c");
    }
}
