//! Command table: name to function lookup.

use std::collections::BTreeMap;

use hostnet_types::ExecResult;

use super::{ExecContext, ToolArgs, ToolSchema};

/// Signature every command implements.
pub type CommandFn = fn(&ToolArgs, &mut ExecContext<'_>) -> ExecResult;

/// A registered command.
#[derive(Debug, Clone)]
pub struct Command {
    pub schema: ToolSchema,
    pub run: CommandFn,
}

/// Table of available commands, ordered by name.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: BTreeMap<String, Command>,
}

impl CommandTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding every builtin.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        super::register_builtins(&mut table);
        table
    }

    /// Register a command. A command with the same name is replaced.
    pub fn register(&mut self, schema: ToolSchema, run: CommandFn) {
        let name = schema.name.clone();
        if self.commands.insert(name.clone(), Command { schema, run }).is_some() {
            tracing::debug!(command = %name, "replaced command");
        }
    }

    /// Look up a command by name.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Check if a command exists.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// List all command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    /// Schemas of all commands, sorted by name.
    pub fn schemas(&self) -> impl Iterator<Item = &ToolSchema> {
        self.commands.values().map(|c| &c.schema)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
