//! ip: Print the address of the host running the session.

use hostnet_types::ExecResult;

use super::{check_arity, report};
use crate::tools::{ExecContext, ToolArgs, ToolSchema};

pub fn schema() -> ToolSchema {
    ToolSchema::new("ip", "Print this host's address")
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("ip", check_arity(args, &schema()).map(|()| ExecResult::success(ctx.address)))
}

#[cfg(test)]
mod tests {
    use crate::tools::testing::Fixture;

    #[test]
    fn test_ip() {
        let mut fx = Fixture::new();
        assert_eq!(fx.run("ip").out, "10.0.0.1");
        assert!(!fx.run("ip extra").ok());
    }
}
