// Shared fakes for integration tests: a scriptable host editor, a counting
// feature host and abbreviation engines with predictable output.
#![allow(dead_code)]

pub mod tracing;

use std::cell::Cell;
use std::rc::Rc;

use serde_json::{Map, Value};
use sprout::{
    AbbreviationEngine, Ast, AstNode, Disposer, EditorId, EngineSet, Error, FeatureHost, Grammar,
    HostEditor, ModeAt, ModePosition, Result, Token,
};

/// In-memory editor instance with a fixed mode.
pub struct FakeEditor {
    pub id: EditorId,
    pub text: String,
    pub cursor: usize,
    pub mode_name: String,
    pub mode_position: ModePosition,
}

impl FakeEditor {
    pub fn new(id: u64, text: &str, cursor: usize, mode: &str) -> Self {
        FakeEditor {
            id: EditorId(id),
            text: text.to_string(),
            cursor,
            mode_name: mode.to_string(),
            mode_position: ModePosition::Text,
        }
    }
}

impl HostEditor for FakeEditor {
    fn id(&self) -> EditorId {
        self.id
    }
    fn text(&self) -> String {
        self.text.clone()
    }
    fn cursor_offset(&self) -> usize {
        self.cursor
    }
    fn mode_at(&self, _offset: usize) -> ModeAt {
        ModeAt {
            name: self.mode_name.clone(),
            position: self.mode_position,
        }
    }
}

/// Feature host that counts starts and (through the disposers) stops.
#[derive(Default)]
pub struct CountingFeatureHost {
    pub tracker_starts: usize,
    pub tag_match_starts: usize,
    pub tracker_stops: Rc<Cell<usize>>,
    pub tag_match_stops: Rc<Cell<usize>>,
    pub fail_tracker: bool,
}

impl FeatureHost for CountingFeatureHost {
    fn start_tracker(&mut self, _editor: &dyn HostEditor) -> std::result::Result<Disposer, String> {
        if self.fail_tracker {
            return Err("tracker backend unavailable".to_string());
        }
        self.tracker_starts += 1;
        let stops = Rc::clone(&self.tracker_stops);
        Ok(Disposer::new(move || stops.set(stops.get() + 1)))
    }

    fn start_tag_match(&mut self, _editor: &dyn HostEditor) -> std::result::Result<Disposer, String> {
        self.tag_match_starts += 1;
        let stops = Rc::clone(&self.tag_match_stops);
        Ok(Disposer::new(move || stops.set(stops.get() + 1)))
    }
}

/// Engine whose output encodes its name and input, so tests can check both
/// routing and pass-through. Abbreviations containing `??` fail to parse.
pub struct FakeEngine {
    pub name: &'static str,
}

impl AbbreviationEngine for FakeEngine {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        if text.is_empty() {
            return Err(Error::parse(text, "empty abbreviation"));
        }
        Ok(vec![Token {
            text: text.to_string(),
            start: 0,
            end: text.len(),
        }])
    }

    fn parse(&self, tokens: Vec<Token>, options: &Map<String, Value>) -> Result<Ast> {
        let source = tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join("");
        if source.contains("??") {
            return Err(Error::parse(source, "unexpected token"));
        }
        let grammar = options
            .get("syntax")
            .and_then(Value::as_str)
            .map(Grammar::from_mode_name)
            .unwrap_or(Grammar::Markup);
        Ok(Ast {
            grammar,
            roots: vec![AstNode {
                name: None,
                value: Some(source),
                repeat: None,
                children: Vec::new(),
            }],
        })
    }

    fn expand(&self, ast: &Ast, _options: &Map<String, Value>) -> Result<String> {
        let source = ast
            .roots
            .first()
            .and_then(|node| node.value.clone())
            .unwrap_or_default();
        Ok(format!("{}[{}]", self.name, source))
    }
}

pub fn fake_engines() -> EngineSet {
    EngineSet::new(
        Box::new(FakeEngine { name: "markup" }),
        Box::new(FakeEngine { name: "stylesheet" }),
    )
}
