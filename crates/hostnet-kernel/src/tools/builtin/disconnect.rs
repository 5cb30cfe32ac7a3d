//! disconnect: Close the relay to a remote host.

use hostnet_types::ExecResult;

use super::{check_arity, report};
use crate::error::{Error, Result};
use crate::tools::{ExecContext, SessionControl, ToolArgs, ToolSchema};

pub fn schema() -> ToolSchema {
    ToolSchema::new("disconnect", "Close the connection to the remote host")
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("disconnect", disconnect(args, ctx))
}

fn disconnect(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> Result<ExecResult> {
    check_arity(args, &schema())?;
    if !ctx.relayed {
        return Err(Error::NotConnected);
    }
    ctx.control = Some(SessionControl::Disconnect);
    Ok(ExecResult::success(""))
}
