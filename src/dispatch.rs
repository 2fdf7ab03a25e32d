//! Expansion dispatch helpers.
//!
//! The expand commands come in two modes that differ only in how much
//! source text is pulled out before parsing: the innermost abbreviation
//! ending at the cursor, or the whole line as one abbreviation. Extraction
//! is pure text work; the tokenize→parse→expand chain is delegated to the
//! engine picked by the router and its output is returned unmodified.

use std::ops::Range;

use serde_json::{Map, Value};

use crate::engine::AbbreviationEngine;
use crate::error::Result;
use crate::host::HostEditor;

/// How much source text the expand-at-cursor commands feed to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// The innermost abbreviation ending at the cursor.
    Innermost,
    /// The whole line, trimmed, as one abbreviation.
    FullLine,
}

/// Abbreviation candidate pulled from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedAbbreviation {
    /// Byte span of the candidate in the document text.
    pub range: Range<usize>,
    pub text: String,
}

/// Run the full engine chain on `abbreviation`. The engine's output is
/// returned as-is; a parse failure propagates with nothing mutated.
pub fn expand_with(
    engine: &dyn AbbreviationEngine,
    abbreviation: &str,
    options: &Map<String, Value>,
) -> Result<String> {
    let tokens = engine.tokenize(abbreviation)?;
    let ast = engine.parse(tokens, options)?;
    engine.expand(&ast, options)
}

/// Extract the abbreviation candidate at the cursor, or `None` when there is
/// nothing usable (empty line, cursor at line start in innermost mode).
pub fn extract_abbreviation(
    editor: &dyn HostEditor,
    mode: ExtractMode,
) -> Option<ExtractedAbbreviation> {
    let text = editor.text();
    let cursor = editor.cursor_offset().min(text.len());
    let line_start = text[..cursor].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = text[cursor..]
        .find('\n')
        .map(|i| cursor + i)
        .unwrap_or(text.len());

    let (start, end) = match mode {
        ExtractMode::FullLine => (line_start, line_end),
        ExtractMode::Innermost => {
            let mut start = cursor;
            for ch in text[line_start..cursor].chars().rev() {
                if !is_abbreviation_char(ch) {
                    break;
                }
                start -= ch.len_utf8();
            }
            (start, cursor)
        }
    };

    let (start, end) = trim_candidate(&text, start, end);
    if start >= end {
        return None;
    }
    Some(ExtractedAbbreviation {
        range: start..end,
        text: text[start..end].to_string(),
    })
}

/// Characters that may appear inside an abbreviation.
fn is_abbreviation_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || matches!(
            ch,
            '#' | '.'
                | '*'
                | '+'
                | '>'
                | '^'
                | ':'
                | '$'
                | '-'
                | '_'
                | '!'
                | '@'
                | '%'
                | '['
                | ']'
                | '('
                | ')'
                | '{'
                | '}'
                | '"'
                | '\''
                | '='
                | ','
                | '/'
        )
}

/// Shrink `[start, end)` to a parse-worthy candidate: strip whitespace and
/// drop leading operator characters and closers without a matching opener.
fn trim_candidate(text: &str, mut start: usize, mut end: usize) -> (usize, usize) {
    while start < end {
        let ch = text[start..end].chars().next().unwrap_or(' ');
        if ch.is_whitespace() || matches!(ch, '+' | '>' | '^' | '*' | ',' | '=' | ':' | '/' | '@' | '!') {
            start += ch.len_utf8();
            continue;
        }
        if !closers_balanced(&text[start..end]) {
            start += ch.len_utf8();
            continue;
        }
        break;
    }
    while start < end {
        let ch = text[start..end].chars().next_back().unwrap_or(' ');
        if !ch.is_whitespace() {
            break;
        }
        end -= ch.len_utf8();
    }
    (start, end)
}

/// True when no closing bracket appears before its opener. Unclosed openers
/// are left for the parser to reject.
fn closers_balanced(slice: &str) -> bool {
    let mut round = 0i32;
    let mut square = 0i32;
    let mut curly = 0i32;
    for ch in slice.chars() {
        match ch {
            '(' => round += 1,
            ')' => round -= 1,
            '[' => square += 1,
            ']' => square -= 1,
            '{' => curly += 1,
            '}' => curly -= 1,
            _ => {}
        }
        if round < 0 || square < 0 || curly < 0 {
            return false;
        }
    }
    true
}
