//! Abbreviation-driven text expansion for embeddable editors.
//!
//! This crate is the extension core only: it decides *when* the optional
//! sub-behaviors (live abbreviation tracking, tag-pair highlighting) run for
//! each editor instance, and it routes abbreviation text to the right
//! syntax-specific engine. The host editing component, the visual
//! mark/decoration mechanics and the expansion algorithm itself live behind
//! the traits in [`host`] and [`engine`].

pub mod commands;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod extension;
pub mod host;
pub mod lifecycle;
pub mod options;
pub mod syntax;

pub use config::{Config, ConfigOverrides};
pub use dispatch::{ExtractMode, ExtractedAbbreviation};
pub use engine::{AbbreviationEngine, Ast, AstNode, EngineSet, Token};
pub use error::{Error, Result};
pub use extension::Extension;
pub use host::{EditorId, FeatureHost, HostEditor, ModeAt, ModePosition};
pub use lifecycle::{Disposer, Feature, FeatureManager};
pub use options::EffectiveConfig;
pub use syntax::{Grammar, SyntaxContext, SyntaxRoute};
