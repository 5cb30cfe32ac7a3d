//! mv: Move or rename a file or directory.

use hostnet_types::ExecResult;

use super::{Placement, check_arity, placement, report};
use crate::error::Result;
use crate::tools::{ExecContext, ParamSchema, ToolArgs, ToolSchema};

pub fn schema() -> ToolSchema {
    ToolSchema::new("mv", "Move or rename files and directories")
        .param(ParamSchema::required("oldpath", "Source path"))
        .param(ParamSchema::required("newpath", "Destination path"))
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("mv", mv(args, ctx))
}

fn mv(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> Result<ExecResult> {
    check_arity(args, &schema())?;
    let source = ctx.resolve(args.get(0).unwrap_or_default())?;
    match placement(ctx, args.get(1).unwrap_or_default())? {
        Placement::Into(dir) => ctx.tree.move_to(source, dir)?,
        Placement::As(dir, name) => ctx.tree.move_as(source, dir, &name)?,
    }
    Ok(ExecResult::success(""))
}
