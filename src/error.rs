//! Error taxonomy for the extension layer.
//!
//! Every fallible operation in this crate either restores a well-defined
//! prior state or returns one of these errors to its immediate caller;
//! nothing is caught and silenced internally.

use crate::lifecycle::Feature;
use thiserror::Error;

/// Errors surfaced by the extension core.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed configuration value. The instance keeps its prior
    /// configuration and lifecycle state.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Malformed abbreviation text. No editor state was mutated.
    #[error("cannot parse abbreviation {abbreviation:?}: {message}")]
    Parse {
        abbreviation: String,
        message: String,
    },

    /// A sub-behavior failed to initialize. Its state reverted to stopped
    /// and no handle was recorded.
    #[error("failed to start {feature}: {message}")]
    LifecycleStart { feature: Feature, message: String },
}

impl Error {
    /// Build a [`Error::Parse`] for the given abbreviation text.
    pub fn parse(abbreviation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Parse {
            abbreviation: abbreviation.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
