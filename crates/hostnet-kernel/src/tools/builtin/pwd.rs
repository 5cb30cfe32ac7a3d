//! pwd: Print the current directory.

use hostnet_types::ExecResult;

use super::{check_arity, report};
use crate::tools::{ExecContext, ToolArgs, ToolSchema};

pub fn schema() -> ToolSchema {
    ToolSchema::new("pwd", "Print current directory")
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("pwd", check_arity(args, &schema()).map(|()| ExecResult::success(ctx.cwd_path())))
}
