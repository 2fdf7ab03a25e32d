//! Per-instance feature lifecycle.
//!
//! Two optional sub-behaviors — the abbreviation tracker and the tag-pair
//! matcher — are started and stopped so that their running state always
//! matches the latest configuration. The manager owns an explicit map from
//! editor identity to instance state; it reacts to host events and releases
//! its own resources, it never owns the editor itself.
//!
//! State machine per instance and per feature, over `{stopped, running}`:
//! flag turns true → start and record the disposer; flag turns false →
//! dispose and clear; unchanged flag → strict no-op. A failed start leaves
//! the feature stopped with nothing recorded.

use std::collections::HashMap;

use crate::config::{Config, ConfigOverrides};
use crate::error::{Error, Result};
use crate::host::{EditorId, FeatureHost, HostEditor};
use crate::options::{self, EffectiveConfig};

/// Optional sub-behavior gated by a configuration flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Live abbreviation tracking (`mark`).
    Tracker,
    /// Tag-pair highlighting (`markTagPairs`).
    TagMatch,
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feature::Tracker => write!(f, "abbreviation tracker"),
            Feature::TagMatch => write!(f, "tag-pair matcher"),
        }
    }
}

/// Idempotent teardown capability for a started sub-behavior.
///
/// The second and every later call is a no-op. Dropping an undisposed
/// disposer runs the teardown as well.
pub struct Disposer(Option<Box<dyn FnOnce()>>);

impl Disposer {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Disposer(Some(Box::new(teardown)))
    }

    /// A disposer with no teardown work, for sub-behaviors that hold no
    /// resources.
    pub fn noop() -> Self {
        Disposer(None)
    }

    /// Run the teardown if it has not run yet.
    pub fn dispose(&mut self) {
        if let Some(teardown) = self.0.take() {
            teardown();
        }
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Disposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Disposer")
            .field(&if self.0.is_some() { "armed" } else { "spent" })
            .finish()
    }
}

/// Running/stopped state of both features for one instance. At most one
/// live disposer per feature; the manager is its sole owner and caller.
#[derive(Debug, Default)]
struct InstanceState {
    tracker: Option<Disposer>,
    tag_match: Option<Disposer>,
}

impl InstanceState {
    fn slot(&mut self, feature: Feature) -> &mut Option<Disposer> {
        match feature {
            Feature::Tracker => &mut self.tracker,
            Feature::TagMatch => &mut self.tag_match,
        }
    }
}

/// Owner of all per-instance feature state.
#[derive(Default)]
pub struct FeatureManager {
    instances: HashMap<EditorId, InstanceState>,
}

impl FeatureManager {
    pub fn new() -> Self {
        FeatureManager::default()
    }

    /// Apply a configuration change for one editor instance.
    ///
    /// The raw overrides are resolved against `defaults` with context
    /// disabled (configuration events are not tied to a cursor position),
    /// then both features are reconciled independently. Events must be
    /// applied in host delivery order; reconciliation runs synchronously to
    /// completion.
    pub fn on_config_change(
        &mut self,
        host: &mut dyn FeatureHost,
        editor: &dyn HostEditor,
        defaults: &Config,
        overrides: &ConfigOverrides,
    ) -> Result<()> {
        let effective = options::resolve(defaults, overrides, None, false);
        self.reconcile(host, editor, &effective)
    }

    /// Bring both features in line with `effective`.
    ///
    /// Each feature lands in a consistent state on its own: a start failure
    /// leaves that feature stopped and does not keep the other feature from
    /// being reconciled. The first failure is returned once both have been
    /// handled.
    pub fn reconcile(
        &mut self,
        host: &mut dyn FeatureHost,
        editor: &dyn HostEditor,
        effective: &EffectiveConfig,
    ) -> Result<()> {
        let tracker = self.apply(host, editor, Feature::Tracker, effective.mark);
        let tag_match = self.apply(host, editor, Feature::TagMatch, effective.mark_tag_pairs);
        tracker.and(tag_match)
    }

    /// Transition one feature towards `wanted`. No-op when already there.
    fn apply(
        &mut self,
        host: &mut dyn FeatureHost,
        editor: &dyn HostEditor,
        feature: Feature,
        wanted: bool,
    ) -> Result<()> {
        let id = editor.id();
        let running = self.instances.entry(id).or_default().slot(feature).is_some();
        match (wanted, running) {
            (true, false) => {
                tracing::debug!(editor = %id, %feature, "starting");
                let started = match feature {
                    Feature::Tracker => host.start_tracker(editor),
                    Feature::TagMatch => host.start_tag_match(editor),
                };
                match started {
                    Ok(disposer) => {
                        *self.instances.entry(id).or_default().slot(feature) = Some(disposer);
                        Ok(())
                    }
                    Err(message) => Err(Error::LifecycleStart { feature, message }),
                }
            }
            (false, true) => {
                tracing::debug!(editor = %id, %feature, "stopping");
                if let Some(mut disposer) = self.instances.entry(id).or_default().slot(feature).take()
                {
                    disposer.dispose();
                }
                Ok(())
            }
            // Already in the wanted state. Restarting here would leak a
            // second sub-behavior instance.
            _ => Ok(()),
        }
    }

    /// Start one feature regardless of its configuration flag. No-op when
    /// already running. Used by the enter-abbreviation-mode command.
    pub fn start(
        &mut self,
        host: &mut dyn FeatureHost,
        editor: &dyn HostEditor,
        feature: Feature,
    ) -> Result<()> {
        self.apply(host, editor, feature, true)
    }

    /// Stop one feature if it is running.
    pub fn stop(&mut self, id: EditorId, feature: Feature) {
        if let Some(state) = self.instances.get_mut(&id) {
            if let Some(mut disposer) = state.slot(feature).take() {
                tracing::debug!(editor = %id, %feature, "stopping");
                disposer.dispose();
            }
        }
    }

    /// Stop and, if it was running, start a feature again with fresh state.
    /// Used by the reset-abbreviation command.
    pub fn restart(
        &mut self,
        host: &mut dyn FeatureHost,
        editor: &dyn HostEditor,
        feature: Feature,
    ) -> Result<()> {
        if !self.is_running(editor.id(), feature) {
            return Ok(());
        }
        self.stop(editor.id(), feature);
        self.apply(host, editor, feature, true)
    }

    /// Release everything held for a closed instance. The host drives
    /// instance lifetime; this only disposes what the manager recorded.
    pub fn on_editor_closed(&mut self, id: EditorId) {
        if let Some(mut state) = self.instances.remove(&id) {
            if let Some(mut disposer) = state.tracker.take() {
                tracing::debug!(editor = %id, "releasing abbreviation tracker");
                disposer.dispose();
            }
            if let Some(mut disposer) = state.tag_match.take() {
                tracing::debug!(editor = %id, "releasing tag-pair matcher");
                disposer.dispose();
            }
        }
    }

    pub fn is_running(&self, id: EditorId, feature: Feature) -> bool {
        self.instances
            .get(&id)
            .map(|state| match feature {
                Feature::Tracker => state.tracker.is_some(),
                Feature::TagMatch => state.tag_match.is_some(),
            })
            .unwrap_or(false)
    }
}
