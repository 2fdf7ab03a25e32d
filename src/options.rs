//! Option Resolver.
//!
//! Merges global defaults, per-instance overrides and (optionally)
//! cursor-context-derived overrides into one [`EffectiveConfig`]. The
//! resolver is a pure function of its arguments so the lifecycle path and
//! the expansion path resolve identically; the result is rebuilt wholesale
//! on every call, never patched in place.

use serde_json::{Map, Value};

use crate::config::{Config, ConfigOverrides};
use crate::host::{HostEditor, ModePosition};
use crate::syntax::SyntaxContext;

/// Effective configuration for one instance at one moment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveConfig {
    pub mark: bool,
    pub mark_tag_pairs: bool,
    /// Options forwarded verbatim to the expansion engine, including the
    /// context-derived `syntax` and quoting keys when context is enabled.
    pub options: Map<String, Value>,
}

/// Resolve the effective configuration.
///
/// Precedence, lowest to highest: `defaults` < `overrides` < context
/// derived from `cursor`. Context is only derived when `use_context` is set
/// *and* a cursor is supplied; "no position" skips derivation entirely
/// rather than assuming offset zero.
pub fn resolve(
    defaults: &Config,
    overrides: &ConfigOverrides,
    cursor: Option<(&dyn HostEditor, usize)>,
    use_context: bool,
) -> EffectiveConfig {
    let mut effective = EffectiveConfig {
        mark: overrides.mark.unwrap_or(defaults.mark),
        mark_tag_pairs: overrides.mark_tag_pairs.unwrap_or(defaults.mark_tag_pairs),
        options: defaults.options.clone(),
    };
    for (key, value) in &overrides.options {
        effective.options.insert(key.clone(), value.clone());
    }

    if use_context {
        if let Some((editor, offset)) = cursor {
            let context = SyntaxContext::at(editor, offset);
            effective.options.insert(
                "syntax".to_string(),
                Value::String(context.grammar.syntax_name().to_string()),
            );
            if context.grammar.is_jsx() {
                effective.options.insert("jsx".to_string(), Value::Bool(true));
            }
            match context.position {
                ModePosition::Text => {}
                ModePosition::AttributeName => {
                    effective.options.insert("inAttribute".to_string(), Value::Bool(true));
                }
                ModePosition::AttributeValue => {
                    effective.options.insert("inAttribute".to_string(), Value::Bool(true));
                    effective
                        .options
                        .insert("inQuotedValue".to_string(), Value::Bool(true));
                }
            }
        }
    }

    effective
}
