//! Interface to the external abbreviation engines.
//!
//! The actual tokenizers, grammar rules and the abbreviation-to-output
//! expansion algorithm live outside this crate. The core only needs the
//! seam defined here: an engine per grammar family that can tokenize, parse
//! and expand, all synchronous and pure.

use serde_json::{Map, Value};

use crate::error::Result;
use crate::syntax::Grammar;

/// One token of a lexed abbreviation, with its span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// One node of a parsed abbreviation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AstNode {
    /// Element or property name, `None` for grouping nodes.
    pub name: Option<String>,
    pub value: Option<String>,
    pub repeat: Option<usize>,
    pub children: Vec<AstNode>,
}

/// Parsed abbreviation, tagged with the grammar that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    pub grammar: Grammar,
    pub roots: Vec<AstNode>,
}

/// External tokenizer/parser/expander for one abbreviation grammar.
///
/// Implementations must not touch editor state; a failed parse leaves
/// nothing to undo. Errors are reported as [`crate::Error::Parse`].
pub trait AbbreviationEngine {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;

    fn parse(&self, tokens: Vec<Token>, options: &Map<String, Value>) -> Result<Ast>;

    fn expand(&self, ast: &Ast, options: &Map<String, Value>) -> Result<String>;
}

/// Engine registry, one engine per grammar family. JSX-flavored markup is
/// served by the markup engine; the JSX quirks are option-driven.
pub struct EngineSet {
    markup: Box<dyn AbbreviationEngine>,
    stylesheet: Box<dyn AbbreviationEngine>,
}

impl EngineSet {
    pub fn new(
        markup: Box<dyn AbbreviationEngine>,
        stylesheet: Box<dyn AbbreviationEngine>,
    ) -> Self {
        EngineSet { markup, stylesheet }
    }

    pub fn for_grammar(&self, grammar: Grammar) -> &dyn AbbreviationEngine {
        match grammar {
            Grammar::Markup | Grammar::JsxMarkup => self.markup.as_ref(),
            Grammar::Stylesheet => self.stylesheet.as_ref(),
        }
    }
}
