//! cat: Print file contents.

use hostnet_types::ExecResult;

use super::{check_arity, report};
use crate::error::Result;
use crate::tools::{ExecContext, ParamSchema, ToolArgs, ToolSchema};

pub fn schema() -> ToolSchema {
    ToolSchema::new("cat", "Print file contents").param(ParamSchema::required("path", "File to read"))
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("cat", cat(args, ctx))
}

fn cat(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> Result<ExecResult> {
    check_arity(args, &schema())?;
    let path = args.get(0).unwrap_or_default();
    let id = ctx.resolve(path)?;
    let content = ctx.tree.content(id)?;
    Ok(ExecResult::success(content.as_text()))
}
