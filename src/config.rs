//! Extension configuration.
//!
//! [`Config`] is the complete configuration shape with the global defaults;
//! [`ConfigOverrides`] is the partial, per-instance form the host delivers
//! on configuration events. Keys the core does not recognize are kept in a
//! pass-through map and forwarded verbatim to the expansion engine
//! (indentation, syntax profile, output formatting and the like).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Complete extension configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Track abbreviations in the document as the user types.
    pub mark: bool,
    /// Highlight the tag pair containing the cursor.
    pub mark_tag_pairs: bool,
    /// Engine options forwarded verbatim.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mark: true,
            mark_tag_pairs: true,
            options: Map::new(),
        }
    }
}

/// Partial configuration applied on top of the defaults for one instance.
/// Absent fields fall through to [`Config`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub mark: Option<bool>,
    pub mark_tag_pairs: Option<bool>,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl ConfigOverrides {
    /// Parse a raw configuration value delivered by the host.
    ///
    /// A value of the wrong shape (non-object, mistyped flag) yields
    /// [`Error::Config`]; callers keep the instance's prior configuration in
    /// that case.
    pub fn from_value(raw: &Value) -> Result<Self> {
        serde_json::from_value(raw.clone()).map_err(|e| Error::Config(e.to_string()))
    }
}

static DEFAULTS: Lazy<Config> = Lazy::new(Config::default);

/// Global default configuration.
pub fn defaults() -> &'static Config {
    &DEFAULTS
}
