//! The extension facade.
//!
//! One [`Extension`] value serves every editor instance of a host: it keeps
//! the global defaults, the per-instance configuration overrides, the
//! feature lifecycle manager and the engine registry, and exposes the
//! per-instance methods the host integration layer calls.

use std::collections::HashMap;

use serde_json::Value;

use crate::config::{self, Config, ConfigOverrides};
use crate::dispatch::{self, ExtractMode, ExtractedAbbreviation};
use crate::engine::{Ast, EngineSet};
use crate::error::Result;
use crate::host::{EditorId, FeatureHost, HostEditor};
use crate::lifecycle::{Feature, FeatureManager};
use crate::options::{self, EffectiveConfig};
use crate::syntax::{self, Grammar};

pub struct Extension {
    engines: EngineSet,
    defaults: Config,
    overrides: HashMap<EditorId, ConfigOverrides>,
    features: FeatureManager,
}

impl Extension {
    pub fn new(engines: EngineSet) -> Self {
        Extension::with_defaults(engines, config::defaults().clone())
    }

    pub fn with_defaults(engines: EngineSet, defaults: Config) -> Self {
        Extension {
            engines,
            defaults,
            overrides: HashMap::new(),
            features: FeatureManager::new(),
        }
    }

    /// Handle a configuration event for one instance.
    ///
    /// A malformed `raw` value returns [`crate::Error::Config`] and leaves
    /// both the stored overrides and the lifecycle state untouched. A valid
    /// value is stored and the features are reconciled against it; a
    /// feature-start failure propagates after reconciliation (the new
    /// configuration still stands, the failed feature stays stopped).
    pub fn on_config_change(
        &mut self,
        host: &mut dyn FeatureHost,
        editor: &dyn HostEditor,
        raw: &Value,
    ) -> Result<()> {
        let overrides = match ConfigOverrides::from_value(raw) {
            Ok(overrides) => overrides,
            Err(err) => {
                tracing::warn!(editor = %editor.id(), %err, "keeping prior configuration");
                return Err(err);
            }
        };
        self.overrides.insert(editor.id(), overrides);
        let overrides = &self.overrides[&editor.id()];
        self.features
            .on_config_change(host, editor, &self.defaults, overrides)
    }

    /// Release everything held for a closed instance.
    pub fn on_editor_closed(&mut self, id: EditorId) {
        self.overrides.remove(&id);
        self.features.on_editor_closed(id);
    }

    /// Effective configuration for `editor`, optionally at a cursor offset
    /// with context derivation.
    pub fn resolve_options(
        &self,
        editor: &dyn HostEditor,
        offset: Option<usize>,
        use_context: bool,
    ) -> EffectiveConfig {
        let empty = ConfigOverrides::default();
        let overrides = self.overrides.get(&editor.id()).unwrap_or(&empty);
        options::resolve(
            &self.defaults,
            overrides,
            offset.map(|o| (editor, o)),
            use_context,
        )
    }

    /// Expand `abbreviation` for `editor` and return the engine's output.
    ///
    /// With `explicit_options` absent, options are resolved at the current
    /// cursor offset with context enabled and the grammar is inferred from
    /// the mode there. Explicit options may carry a `syntax` key, which then
    /// acts as the requested grammar. Nothing is mutated; parse failures
    /// propagate to the caller, which owns user-visible feedback.
    pub fn expand_abbreviation(
        &self,
        editor: &dyn HostEditor,
        abbreviation: &str,
        explicit_options: Option<&EffectiveConfig>,
    ) -> Result<String> {
        let offset = editor.cursor_offset();
        let resolved;
        let effective = match explicit_options {
            Some(options) => options,
            None => {
                resolved = self.resolve_options(editor, Some(offset), true);
                &resolved
            }
        };
        let requested = effective
            .options
            .get("syntax")
            .and_then(Value::as_str)
            .map(Grammar::from_mode_name);
        let route = syntax::route(&self.engines, editor, offset, requested);
        dispatch::expand_with(route.engine, abbreviation, &effective.options)
    }

    /// Parse `abbreviation` against an explicit grammar without expanding.
    pub fn parse_abbreviation(&self, abbreviation: &str, grammar: Grammar) -> Result<Ast> {
        let mut effective = options::resolve(&self.defaults, &ConfigOverrides::default(), None, false);
        effective.options.insert(
            "syntax".to_string(),
            Value::String(grammar.syntax_name().to_string()),
        );
        let engine = self.engines.for_grammar(grammar);
        let tokens = engine.tokenize(abbreviation)?;
        engine.parse(tokens, &effective.options)
    }

    /// Extract and expand the abbreviation at the cursor. Returns the
    /// replaced span and the expansion, or `None` when the cursor has no
    /// abbreviation candidate.
    pub fn expand_at_cursor(
        &self,
        editor: &dyn HostEditor,
        mode: ExtractMode,
    ) -> Result<Option<(ExtractedAbbreviation, String)>> {
        let Some(found) = dispatch::extract_abbreviation(editor, mode) else {
            return Ok(None);
        };
        let output = self.expand_abbreviation(editor, &found.text, None)?;
        Ok(Some((found, output)))
    }

    /// Force the abbreviation tracker on for `editor`, independent of its
    /// `mark` flag. No-op when already running.
    pub fn enter_abbreviation_mode(
        &mut self,
        host: &mut dyn FeatureHost,
        editor: &dyn HostEditor,
    ) -> Result<()> {
        self.features.start(host, editor, Feature::Tracker)
    }

    /// Restart the tracker with fresh state if it is running.
    pub fn reset_abbreviation(
        &mut self,
        host: &mut dyn FeatureHost,
        editor: &dyn HostEditor,
    ) -> Result<()> {
        self.features.restart(host, editor, Feature::Tracker)
    }

    pub fn is_running(&self, id: EditorId, feature: Feature) -> bool {
        self.features.is_running(id, feature)
    }
}
