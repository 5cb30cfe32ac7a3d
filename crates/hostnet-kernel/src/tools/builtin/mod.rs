//! Built-in commands.
//!
//! Each module exposes `schema()` and `run()`; `run` never fails outright,
//! errors come back as a failed [`ExecResult`] prefixed with the command name.

mod cat;
mod cd;
mod connect;
mod cp;
mod disconnect;
mod echo;
mod help;
mod ip;
mod ls;
mod mkdir;
mod mv;
mod pwd;
mod replace;
mod rm;
mod touch;
mod tree;
mod write;

use hostnet_types::ExecResult;

use super::{CommandTable, ExecContext, ToolArgs, ToolSchema};
use crate::error::{Error, Result};
use crate::vfs::NodeId;

/// Register all built-in commands with the table.
pub fn register_builtins(table: &mut CommandTable) {
    table.register(cat::schema(), cat::run);
    table.register(cd::schema(), cd::run);
    table.register(connect::schema(), connect::run);
    table.register(cp::schema(), cp::run);
    table.register(disconnect::schema(), disconnect::run);
    table.register(echo::schema(), echo::run);
    table.register(help::schema(), help::run);
    table.register(ip::schema(), ip::run);
    table.register(ls::schema(), ls::run);
    table.register(mkdir::schema(), mkdir::run);
    table.register(mv::schema(), mv::run);
    table.register(pwd::schema(), pwd::run);
    table.register(replace::schema(), replace::run);
    table.register(rm::schema(), rm::run);
    table.register(touch::schema(), touch::run);
    table.register(tree::schema(), tree::run);
    table.register(write::schema(), write::run);
}

/// Turn a command outcome into a result, prefixing errors with the command name.
fn report(name: &str, outcome: Result<ExecResult>) -> ExecResult {
    outcome.unwrap_or_else(|e| ExecResult::failure(1, format!("{name}: {e}")))
}

/// Check the positional count against the schema's required and total params.
fn check_arity(args: &ToolArgs, schema: &ToolSchema) -> Result<()> {
    let required = schema.params.iter().filter(|p| p.required).count();
    if args.len() < required || args.len() > schema.params.len() {
        return Err(Error::BadArguments(schema.syntax()));
    }
    Ok(())
}

/// Where `mv` and `cp` put their source.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Placement {
    /// Into an existing directory, keeping the source's name.
    Into(NodeId),
    /// Into `dir` under a new name.
    As(NodeId, String),
}

/// Interpret the destination operand of `mv` and `cp`.
///
/// An existing directory receives the source. An existing file is a
/// conflict. A path that does not exist names the new leaf, unless it ends
/// in `/`, in which case the directory had to exist already.
fn placement(ctx: &ExecContext<'_>, destination: &str) -> Result<Placement> {
    let dir_typed = destination.len() > 1 && destination.ends_with('/');
    match ctx.resolve(destination) {
        Ok(existing) => {
            let node = ctx.tree.node(existing)?;
            if node.is_dir() {
                Ok(Placement::Into(existing))
            } else {
                Err(Error::NameConflict(node.name().to_string()))
            }
        }
        Err(Error::PathNotFound(_)) if !dir_typed => {
            let parent = ctx.resolve_parent(destination)?;
            Ok(Placement::As(parent.dir, parent.leaf))
        }
        Err(e) => Err(e),
    }
}
