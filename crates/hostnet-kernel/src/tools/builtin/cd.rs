//! cd: Change the session's current directory.

use hostnet_types::ExecResult;

use super::{check_arity, report};
use crate::error::Result;
use crate::tools::{ExecContext, ParamSchema, ToolArgs, ToolSchema};

pub fn schema() -> ToolSchema {
    ToolSchema::new("cd", "Change current directory")
        .param(ParamSchema::optional("path", "Directory to change to (default: /)"))
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("cd", cd(args, ctx))
}

fn cd(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> Result<ExecResult> {
    check_arity(args, &schema())?;
    let target = args.get(0).unwrap_or("/");
    ctx.cwd = ctx.resolve_dir(target)?;
    Ok(ExecResult::success(""))
}

#[cfg(test)]
mod tests {
    use crate::tools::testing::Fixture;

    #[test]
    fn test_cd_absolute_and_relative() {
        let mut fx = Fixture::new();
        assert!(fx.run("cd /docs").ok());
        assert_eq!(fx.cwd_path(), "/docs");
        assert!(fx.run("cd sub").ok());
        assert_eq!(fx.cwd_path(), "/docs/sub");
        assert!(fx.run("cd ../..").ok());
        assert_eq!(fx.cwd_path(), "/");
    }

    #[test]
    fn test_cd_without_args_goes_to_root() {
        let mut fx = Fixture::new();
        fx.run("cd docs/sub");
        assert!(fx.run("cd").ok());
        assert_eq!(fx.cwd_path(), "/");
    }

    #[test]
    fn test_cd_into_file_fails() {
        let mut fx = Fixture::new();
        let result = fx.run("cd notes.txt");
        assert!(!result.ok());
        assert!(result.err.contains("Not a directory"));
        assert_eq!(fx.cwd_path(), "/");
    }

    #[test]
    fn test_cd_missing() {
        let mut fx = Fixture::new();
        let result = fx.run("cd nowhere");
        assert_eq!(result.err, "cd: nowhere: path not found");
    }
}
