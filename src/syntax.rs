//! Grammar routing from cursor context.
//!
//! The router decides which abbreviation grammar applies at a cursor
//! position and which engine of the [`EngineSet`] will serve the request.
//! It never invokes the engine and it never fails: out-of-bounds offsets are
//! clamped, unknown modes fall back to markup. Only expansion may fail.

use crate::engine::{AbbreviationEngine, EngineSet};
use crate::host::{HostEditor, ModePosition};

/// Abbreviation grammar family.
///
/// Closed variant so that adding a grammar forces every dispatch site to be
/// revisited at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// HTML-like markup.
    Markup,
    /// CSS-family stylesheets.
    Stylesheet,
    /// Markup with JSX quirks (className, expression attributes).
    JsxMarkup,
}

impl Grammar {
    /// True for both plain and JSX-flavored markup.
    pub fn is_markup(self) -> bool {
        matches!(self, Grammar::Markup | Grammar::JsxMarkup)
    }

    pub fn is_jsx(self) -> bool {
        matches!(self, Grammar::JsxMarkup)
    }

    /// Name forwarded to the expansion engine as its `syntax` option.
    pub fn syntax_name(self) -> &'static str {
        match self {
            Grammar::Markup => "html",
            Grammar::Stylesheet => "css",
            Grammar::JsxMarkup => "jsx",
        }
    }

    /// Infer the grammar from a host mode name.
    pub fn from_mode_name(name: &str) -> Grammar {
        match name {
            "css" | "scss" | "sass" | "less" | "stylus" => Grammar::Stylesheet,
            "jsx" | "tsx" | "javascriptreact" | "typescriptreact" => Grammar::JsxMarkup,
            _ => Grammar::Markup,
        }
    }
}

/// Syntax situation at one cursor offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxContext {
    pub grammar: Grammar,
    /// Attribute/value position, forwarded to the engine's quoting options.
    pub position: ModePosition,
}

impl SyntaxContext {
    /// Derive the context at `offset`. The offset is clamped to document
    /// bounds before the host is queried.
    pub fn at(editor: &dyn HostEditor, offset: usize) -> SyntaxContext {
        let clamped = offset.min(editor.text().len());
        let mode = editor.mode_at(clamped);
        SyntaxContext {
            grammar: Grammar::from_mode_name(&mode.name),
            position: mode.position,
        }
    }
}

/// Routing decision for one request: the grammar, the surrounding context
/// and the engine that will serve it.
pub struct SyntaxRoute<'a> {
    pub grammar: Grammar,
    pub context: SyntaxContext,
    pub engine: &'a dyn AbbreviationEngine,
}

/// Route a request at `offset`. An explicitly `requested` grammar wins over
/// position-derived inference, which supports programmatic invocation
/// without a live cursor mode.
pub fn route<'a>(
    engines: &'a EngineSet,
    editor: &dyn HostEditor,
    offset: usize,
    requested: Option<Grammar>,
) -> SyntaxRoute<'a> {
    let mut context = SyntaxContext::at(editor, offset);
    if let Some(grammar) = requested {
        context.grammar = grammar;
    }
    SyntaxRoute {
        grammar: context.grammar,
        engine: engines.for_grammar(context.grammar),
        context,
    }
}
