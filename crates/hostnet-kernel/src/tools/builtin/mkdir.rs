//! mkdir: Create a directory.

use hostnet_types::ExecResult;

use super::{check_arity, report};
use crate::error::Result;
use crate::tools::{ExecContext, ParamSchema, ToolArgs, ToolSchema};

pub fn schema() -> ToolSchema {
    ToolSchema::new("mkdir", "Create a directory")
        .param(ParamSchema::required("path", "Directory to create"))
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("mkdir", mkdir(args, ctx))
}

fn mkdir(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> Result<ExecResult> {
    check_arity(args, &schema())?;
    let parent = ctx.resolve_parent(args.get(0).unwrap_or_default())?;
    ctx.tree.add_dir(parent.dir, &parent.leaf)?;
    Ok(ExecResult::success(""))
}
