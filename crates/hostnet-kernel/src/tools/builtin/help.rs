//! help: List commands, or describe one.

use hostnet_types::ExecResult;

use super::{check_arity, report};
use crate::error::{Error, Result};
use crate::tools::{ExecContext, ParamSchema, ToolArgs, ToolSchema};

pub fn schema() -> ToolSchema {
    ToolSchema::new("help", "Show available commands")
        .param(ParamSchema::optional("command", "Command to describe"))
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("help", help(args, ctx))
}

fn help(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> Result<ExecResult> {
    check_arity(args, &schema())?;

    if let Some(name) = args.get(0) {
        let command = ctx
            .commands
            .get(name)
            .ok_or_else(|| Error::CommandNotFound(name.to_string()))?;
        let schema = &command.schema;
        let mut out = format!("{}\n\n{}", schema.usage(), schema.description);
        for param in &schema.params {
            out.push_str(&format!("\n  {:<12} {}", param.name, param.description));
        }
        return Ok(ExecResult::success(out));
    }

    let width = ctx.commands.schemas().map(|s| s.usage().len()).max().unwrap_or(0);
    let lines: Vec<String> = ctx
        .commands
        .schemas()
        .map(|s| format!("{:<width$}  {}", s.usage(), s.description))
        .collect();
    Ok(ExecResult::success(lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use crate::tools::testing::Fixture;

    #[test]
    fn test_help_lists_every_command() {
        let mut fx = Fixture::new();
        let result = fx.run("help");
        assert!(result.ok());
        assert_eq!(result.out.lines().count(), fx.commands.len());
        assert!(result.out.contains("mv <oldpath> <newpath>"));
        assert!(result.out.lines().next().unwrap().starts_with("cat <path>"));
    }

    #[test]
    fn test_help_for_one_command() {
        let mut fx = Fixture::new();
        let result = fx.run("help replace");
        assert!(result.out.starts_with("replace <file> <old> <new> [count]"));
        assert!(result.out.contains("count"));
        assert!(!fx.run("help frobnicate").ok());
    }
}
