//! Interfaces provided by the host editing component.
//!
//! The extension core is host-agnostic: it never touches a concrete editor
//! type. The host integration layer implements [`HostEditor`] for its editor
//! instances and [`FeatureHost`] for the visual sub-behaviors (abbreviation
//! tracking marks, tag-pair highlights) whose lifecycle the core manages but
//! whose rendering it does not.

use crate::lifecycle::Disposer;

/// Unique identifier for a live editor instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorId(pub u64);

impl std::fmt::Display for EditorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "editor-{}", self.0)
    }
}

/// Where an offset sits relative to markup attribute structure. Affects the
/// quoting/escaping options forwarded to the expansion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModePosition {
    /// Plain text / element content.
    #[default]
    Text,
    /// Inside an attribute name.
    AttributeName,
    /// Inside a quoted attribute value.
    AttributeValue,
}

/// Host-reported syntax mode at a document offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeAt {
    /// Host mode name, e.g. `html`, `css`, `jsx`.
    pub name: String,
    pub position: ModePosition,
}

impl ModeAt {
    pub fn new(name: impl Into<String>) -> Self {
        ModeAt {
            name: name.into(),
            position: ModePosition::Text,
        }
    }
}

/// Read access to one live editor instance.
///
/// All queries are synchronous snapshots; the core never holds onto the
/// returned values across host events.
pub trait HostEditor {
    fn id(&self) -> EditorId;

    /// Full document text.
    fn text(&self) -> String;

    /// Current cursor position as a byte offset into [`HostEditor::text`].
    fn cursor_offset(&self) -> usize;

    /// Syntax mode at the given offset. Callers pass offsets already clamped
    /// to document bounds.
    fn mode_at(&self, offset: usize) -> ModeAt;
}

/// Constructors for the optional sub-behaviors.
///
/// Implemented by the host integration layer; the lifecycle manager invokes
/// these when a feature flag turns on and keeps only the returned
/// [`Disposer`]. Errors are plain messages; the manager wraps them into
/// [`crate::Error::LifecycleStart`].
pub trait FeatureHost {
    /// Start live abbreviation tracking for `editor`.
    fn start_tracker(&mut self, editor: &dyn HostEditor) -> Result<Disposer, String>;

    /// Start tag-pair highlighting for `editor`.
    fn start_tag_match(&mut self, editor: &dyn HostEditor) -> Result<Disposer, String>;
}
