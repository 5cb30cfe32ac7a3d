//! ls: List directory contents.

use hostnet_types::ExecResult;

use super::{check_arity, report};
use crate::error::Result;
use crate::tools::{ExecContext, ParamSchema, ToolArgs, ToolSchema};

pub fn schema() -> ToolSchema {
    ToolSchema::new("ls", "List directory contents")
        .param(ParamSchema::optional("path", "Directory to list (default: current directory)"))
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("ls", ls(args, ctx))
}

fn ls(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> Result<ExecResult> {
    check_arity(args, &schema())?;
    let target = match args.get(0) {
        Some(path) => ctx.resolve(path)?,
        None => ctx.cwd,
    };

    let node = ctx.tree.node(target)?;
    if node.is_file() {
        return Ok(ExecResult::success(node.name()));
    }
    let names = ctx.tree.list_immediate(target)?;
    Ok(ExecResult::success(names.join("\n")))
}
