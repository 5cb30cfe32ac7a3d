//! Command system.
//!
//! Every terminal command is a plain function registered in a
//! [`CommandTable`] under its name, next to the schema used for argument
//! errors and `help`.
//!
//! ```text
//! CommandTable
//! ├── filesystem (cd, ls, tree, cat, mkdir, touch, rm, mv, cp, write, replace)
//! ├── shell (echo, pwd, ip, help)
//! └── sessions (connect, disconnect)
//! ```

mod builtin;
mod context;
mod registry;
mod traits;

pub use builtin::register_builtins;
pub use context::{ExecContext, SessionControl};
pub use registry::{Command, CommandFn, CommandTable};
pub use traits::{ParamSchema, ToolArgs, ToolSchema};

#[cfg(test)]
pub(crate) use builtin::testing;
