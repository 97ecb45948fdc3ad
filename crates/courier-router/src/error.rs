//! Route registration errors.

use thiserror::Error;

/// Error raised while registering a route.
///
/// Matching never fails; only building the table does.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The verb is not a valid HTTP method token.
    #[error("invalid HTTP verb '{verb}'")]
    InvalidVerb {
        /// The rejected verb.
        verb: String,
    },

    /// A `{}` placeholder with no name.
    #[error("empty placeholder in pattern '{pattern}'")]
    EmptyPlaceholder {
        /// The offending pattern.
        pattern: String,
    },

    /// The same placeholder name appears twice in one pattern.
    #[error("placeholder '{name}' appears more than once in pattern '{pattern}'")]
    DuplicatePlaceholder {
        /// The offending pattern.
        pattern: String,
        /// The repeated name.
        name: String,
    },

    /// The compiled expression was rejected by the regex engine.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Regex engine message.
        reason: String,
    },
}

impl RouteError {
    /// Creates an invalid verb error.
    pub fn invalid_verb(verb: impl Into<String>) -> Self {
        Self::InvalidVerb { verb: verb.into() }
    }

    /// Creates an empty placeholder error.
    pub fn empty_placeholder(pattern: impl Into<String>) -> Self {
        Self::EmptyPlaceholder {
            pattern: pattern.into(),
        }
    }

    /// Creates a duplicate placeholder error.
    pub fn duplicate_placeholder(pattern: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicatePlaceholder {
            pattern: pattern.into(),
            name: name.into(),
        }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// The pattern involved, when there is one.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::InvalidVerb { .. } => None,
            Self::EmptyPlaceholder { pattern }
            | Self::DuplicatePlaceholder { pattern, .. }
            | Self::InvalidPattern { pattern, .. } => Some(pattern),
        }
    }
}
