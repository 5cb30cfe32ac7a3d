//! connect: Relay this session to another host.
//!
//! The command only validates and records the request. The network opens
//! the guest session on the remote host once this host is released.

use hostnet_types::ExecResult;

use super::{check_arity, report};
use crate::error::{Error, Result};
use crate::tools::{ExecContext, ParamSchema, SessionControl, ToolArgs, ToolSchema};

pub fn schema() -> ToolSchema {
    ToolSchema::new("connect", "Open a session on another host")
        .param(ParamSchema::required("address", "Address of the host to connect to"))
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("connect", connect(args, ctx))
}

fn connect(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> Result<ExecResult> {
    check_arity(args, &schema())?;
    if ctx.guest {
        return Err(Error::GuestConnect);
    }
    let address = args.get(0).unwrap_or_default();
    if address == ctx.address {
        return Err(Error::SelfConnect);
    }
    ctx.control = Some(SessionControl::Connect(address.to_string()));
    Ok(ExecResult::success(""))
}
