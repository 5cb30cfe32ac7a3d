//! cp: Copy a file or directory.

use hostnet_types::ExecResult;

use super::{Placement, check_arity, placement, report};
use crate::error::Result;
use crate::tools::{ExecContext, ParamSchema, ToolArgs, ToolSchema};

pub fn schema() -> ToolSchema {
    ToolSchema::new("cp", "Copy files and directories")
        .param(ParamSchema::required("source", "Source path"))
        .param(ParamSchema::required("destination", "Destination path"))
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("cp", cp(args, ctx))
}

fn cp(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> Result<ExecResult> {
    check_arity(args, &schema())?;
    let source = ctx.resolve(args.get(0).unwrap_or_default())?;
    match placement(ctx, args.get(1).unwrap_or_default())? {
        Placement::Into(dir) => {
            let name = ctx.tree.node(source)?.name().to_string();
            ctx.tree.copy(source, dir, &name)?;
        }
        Placement::As(dir, name) => {
            ctx.tree.copy(source, dir, &name)?;
        }
    }
    Ok(ExecResult::success(""))
}

#[cfg(test)]
mod tests {
    use crate::tools::testing::Fixture;

    #[test]
    fn test_cp_file_with_new_name() {
        let mut fx = Fixture::new();
        assert!(fx.run("cp notes.txt copy.txt").ok());
        assert_eq!(fx.text("/copy.txt"), "hello world");
        assert_eq!(fx.text("/notes.txt"), "hello world");
    }

    #[test]
    fn test_cp_directory_is_deep() {
        let mut fx = Fixture::new();
        assert!(fx.run("cp docs empty").ok());
        assert_eq!(fx.text("/empty/docs/sub/b.txt"), "beta");

        // The copy is independent of the original.
        fx.run("write /empty/docs/sub/b.txt changed");
        assert_eq!(fx.text("/docs/sub/b.txt"), "beta");
    }

    #[test]
    fn test_cp_into_own_subtree_fails() {
        let mut fx = Fixture::new();
        let before = fx.tree.len();
        assert!(fx.run("cp docs docs/sub").err.contains("subdirectory of itself"));
        assert!(!fx.run("cp / empty").ok());
        assert_eq!(fx.tree.len(), before);
    }

    #[test]
    fn test_cp_onto_existing_file_fails() {
        let mut fx = Fixture::new();
        assert!(fx.run("cp docs/a.txt notes.txt").err.contains("already exists"));
    }

    #[test]
    fn test_cp_conflict_in_destination_directory() {
        let mut fx = Fixture::new();
        fx.run("touch empty/notes.txt");
        assert!(fx.run("cp notes.txt empty").err.contains("already exists"));
        assert_eq!(fx.text("/empty/notes.txt"), "");
    }
}
