//! echo: Print arguments joined by single spaces.

use hostnet_types::ExecResult;

use crate::tools::{ExecContext, ParamSchema, ToolArgs, ToolSchema};

pub fn schema() -> ToolSchema {
    ToolSchema::new("echo", "Print arguments").param(ParamSchema::optional("text...", "Words to print"))
}

pub fn run(args: &ToolArgs, _ctx: &mut ExecContext<'_>) -> ExecResult {
    ExecResult::success(args.joined_from(0))
}
