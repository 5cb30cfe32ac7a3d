//! Command schemas and parsed arguments.

use crate::lexer::Word;

/// Schema for a command parameter.
#[derive(Debug, Clone)]
pub struct ParamSchema {
    /// Parameter name.
    pub name: String,
    /// Whether this parameter is required.
    pub required: bool,
    /// Description for help text.
    pub description: String,
}

impl ParamSchema {
    /// Create a required parameter.
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            description: description.into(),
        }
    }

    /// Create an optional parameter.
    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            description: description.into(),
        }
    }
}

/// Schema describing a command's interface.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    /// Command name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Parameter definitions.
    pub params: Vec<ParamSchema>,
}

impl ToolSchema {
    /// Create a new schema.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter to the schema.
    pub fn param(mut self, param: ParamSchema) -> Self {
        self.params.push(param);
        self
    }

    /// One-line usage, e.g. `mv <oldpath> <newpath>` or `cd [path]`.
    pub fn usage(&self) -> String {
        let mut usage = self.name.clone();
        for p in &self.params {
            if p.required {
                usage.push_str(&format!(" <{}>", p.name));
            } else {
                usage.push_str(&format!(" [{}]", p.name));
            }
        }
        usage
    }

    /// The `Syntax: ...` line used in argument errors.
    pub fn syntax(&self) -> String {
        format!("Syntax: {}", self.usage())
    }
}

/// Positional arguments for one command, the command name excluded.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    pub positional: Vec<Word>,
}

impl ToolArgs {
    /// Create empty args.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }

    /// Text of the positional argument at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(Word::as_str)
    }

    /// The word at `index`, with its quoting information.
    pub fn word(&self, index: usize) -> Option<&Word> {
        self.positional.get(index)
    }

    /// Arguments from `index` onward joined with single spaces.
    pub fn joined_from(&self, index: usize) -> String {
        self.positional
            .iter()
            .skip(index)
            .map(Word::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<Vec<Word>> for ToolArgs {
    fn from(positional: Vec<Word>) -> Self {
        Self { positional }
    }
}
