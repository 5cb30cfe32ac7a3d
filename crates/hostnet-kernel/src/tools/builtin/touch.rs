//! touch: Create an empty file.

use hostnet_types::ExecResult;

use super::{check_arity, report};
use crate::error::{Error, Result};
use crate::tools::{ExecContext, ParamSchema, ToolArgs, ToolSchema};

pub fn schema() -> ToolSchema {
    ToolSchema::new("touch", "Create an empty file").param(ParamSchema::required("path", "File to create"))
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("touch", touch(args, ctx))
}

fn touch(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> Result<ExecResult> {
    check_arity(args, &schema())?;
    let path = args.get(0).unwrap_or_default();
    let parent = ctx.resolve_parent(path)?;
    if parent.dir_typed {
        return Err(Error::MissingName(path.to_string()));
    }
    ctx.tree.add_file(parent.dir, &parent.leaf, "")?;
    Ok(ExecResult::success(""))
}
