//! Error types for matcher construction.

use std::fmt;

/// Errors raised when a matcher is constructed with invalid configuration.
///
/// These are programmer errors: they are detected eagerly, halt
/// construction, and have no recovery path, so a bad configuration can
/// never silently degrade into a matcher that matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The hashtag service name is not recognized.
    UnknownHashtagService {
        /// The name that was supplied
        name: String,
    },
    /// The mention service name is not recognized.
    UnknownMentionService {
        /// The name that was supplied
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownHashtagService { name } => {
                write!(
                    f,
                    "unknown hashtag service '{name}'; expected one of: twitter, facebook, instagram, tiktok, youtube"
                )
            }
            Self::UnknownMentionService { name } => {
                write!(
                    f,
                    "unknown mention service '{name}'; expected one of: twitter, instagram, soundcloud, tiktok, youtube"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
