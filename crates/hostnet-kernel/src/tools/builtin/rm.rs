//! rm: Remove a file or directory.
//!
//! Directories are removed together with everything below them. Sessions
//! whose cursor was inside the removed subtree fall back to the root once
//! the command finishes.

use hostnet_types::ExecResult;

use super::{check_arity, report};
use crate::error::{Error, Result};
use crate::tools::{ExecContext, ParamSchema, ToolArgs, ToolSchema};

pub fn schema() -> ToolSchema {
    ToolSchema::new("rm", "Remove a file or directory")
        .param(ParamSchema::required("path", "File or directory to remove"))
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("rm", rm(args, ctx))
}

fn rm(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> Result<ExecResult> {
    check_arity(args, &schema())?;
    let id = ctx.resolve(args.get(0).unwrap_or_default())?;
    let node = ctx.tree.node(id)?;
    let parent = node.parent().ok_or(Error::RootImmutable)?;
    let name = node.name().to_string();

    let removed = ctx.tree.remove(parent, &name)?;
    tracing::debug!(name = removed.name(), nodes = removed.len(), "rm");
    Ok(ExecResult::success(""))
}
