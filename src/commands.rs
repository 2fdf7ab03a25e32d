//! Editor command registration.
//!
//! Commands are registered into an explicit [`CommandRegistry`] value whose
//! lifetime belongs to the host integration layer; there is no global
//! table. Handlers are thin over [`Extension`] — every command resolves its
//! options and grammar through the extension, nothing else is shared.

use std::collections::HashMap;

use crate::dispatch::ExtractMode;
use crate::error::Result;
use crate::extension::Extension;
use crate::host::{FeatureHost, HostEditor};

/// Outcome of a command: expansion commands yield the replacement text and
/// the document span it replaces, lifecycle commands yield nothing.
pub type CommandOutcome = Option<(std::ops::Range<usize>, String)>;

/// An editor command bound to the active instance.
pub type Command =
    fn(&mut Extension, &mut dyn FeatureHost, &dyn HostEditor) -> Result<CommandOutcome>;

/// Extension-point registry for editor commands.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        CommandRegistry::default()
    }

    pub fn register(&mut self, name: &'static str, command: Command) {
        self.commands.insert(name, command);
    }

    pub fn get(&self, name: &str) -> Option<Command> {
        self.commands.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }
}

/// Register the extension's commands. Called once by the host integration
/// layer during setup.
pub fn register_commands(registry: &mut CommandRegistry) {
    registry.register("expand_abbreviation", expand_abbreviation);
    registry.register("expand_abbreviation_all", expand_abbreviation_all);
    registry.register("enter_abbreviation_mode", enter_abbreviation_mode);
    registry.register("reset_abbreviation", reset_abbreviation);
}

/// Expand the innermost abbreviation at the cursor.
fn expand_abbreviation(
    extension: &mut Extension,
    _host: &mut dyn FeatureHost,
    editor: &dyn HostEditor,
) -> Result<CommandOutcome> {
    let expanded = extension.expand_at_cursor(editor, ExtractMode::Innermost)?;
    Ok(expanded.map(|(found, output)| (found.range, output)))
}

/// Expand the whole cursor line as one abbreviation.
fn expand_abbreviation_all(
    extension: &mut Extension,
    _host: &mut dyn FeatureHost,
    editor: &dyn HostEditor,
) -> Result<CommandOutcome> {
    let expanded = extension.expand_at_cursor(editor, ExtractMode::FullLine)?;
    Ok(expanded.map(|(found, output)| (found.range, output)))
}

fn enter_abbreviation_mode(
    extension: &mut Extension,
    host: &mut dyn FeatureHost,
    editor: &dyn HostEditor,
) -> Result<CommandOutcome> {
    extension.enter_abbreviation_mode(host, editor)?;
    Ok(None)
}

fn reset_abbreviation(
    extension: &mut Extension,
    host: &mut dyn FeatureHost,
    editor: &dyn HostEditor,
) -> Result<CommandOutcome> {
    extension.reset_abbreviation(host, editor)?;
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_covers_the_full_command_set() {
        let mut registry = CommandRegistry::new();
        register_commands(&mut registry);
        let mut names: Vec<_> = registry.names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "enter_abbreviation_mode",
                "expand_abbreviation",
                "expand_abbreviation_all",
                "reset_abbreviation",
            ]
        );
        assert!(registry.get("expand_abbreviation").is_some());
        assert!(registry.get("no_such_command").is_none());
    }
}
