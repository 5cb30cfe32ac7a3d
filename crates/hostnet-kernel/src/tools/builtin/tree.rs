//! tree: Display a directory as an indented tree.

use hostnet_types::ExecResult;

use super::{check_arity, report};
use crate::error::Result;
use crate::tools::{ExecContext, ParamSchema, ToolArgs, ToolSchema};

pub fn schema() -> ToolSchema {
    ToolSchema::new("tree", "Display directory tree")
        .param(ParamSchema::optional("path", "Directory to display (default: current directory)"))
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("tree", tree(args, ctx))
}

fn tree(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> Result<ExecResult> {
    check_arity(args, &schema())?;
    let target = match args.get(0) {
        Some(path) => ctx.resolve_dir(path)?,
        None => ctx.cwd,
    };
    let lines: Vec<String> = ctx.tree.list_tree(target)?.collect();
    Ok(ExecResult::success(lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use crate::tools::testing::Fixture;

    #[test]
    fn test_tree_from_root() {
        let mut fx = Fixture::new();
        let result = fx.run("tree");
        assert_eq!(
            result.out,
            "docs/\n  a.txt\n  sub/\n    b.txt\nnotes.txt\nempty/"
        );
    }

    #[test]
    fn test_tree_of_subdirectory() {
        let mut fx = Fixture::new();
        fx.run("cd docs");
        assert_eq!(fx.run("tree").out, "a.txt\nsub/\n  b.txt");
        assert_eq!(fx.run("tree /empty").out, "");
    }

    #[test]
    fn test_tree_of_file_fails() {
        let mut fx = Fixture::new();
        assert!(!fx.run("tree notes.txt").ok());
    }
}
