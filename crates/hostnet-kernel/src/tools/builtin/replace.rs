//! replace: Substitute text inside a file.

use hostnet_types::ExecResult;

use super::{check_arity, report};
use crate::error::{Error, Result};
use crate::tools::{ExecContext, ParamSchema, ToolArgs, ToolSchema};
use crate::vfs::Content;

pub fn schema() -> ToolSchema {
    ToolSchema::new("replace", "Replace occurrences of text in a file")
        .param(ParamSchema::required("file", "File to edit"))
        .param(ParamSchema::required("old", "Text to find"))
        .param(ParamSchema::required("new", "Replacement text"))
        .param(ParamSchema::optional("count", "Replace at most this many occurrences"))
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("replace", replace(args, ctx))
}

fn replace(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> Result<ExecResult> {
    check_arity(args, &schema())?;
    let path = args.get(0).unwrap_or_default();
    let old = args.get(1).unwrap_or_default();
    let new = args.get(2).unwrap_or_default();
    let count = args
        .get(3)
        .map(|c| {
            c.parse::<usize>()
                .map_err(|_| Error::BadArguments(format!("count must be a non-negative integer, got {c:?}")))
        })
        .transpose()?;

    let id = ctx.resolve_file(path)?;
    let Content::Text(text) = ctx.tree.content(id)? else {
        return Err(Error::NotText(path.to_string()));
    };
    let updated = match count {
        Some(n) => text.replacen(old, new, n),
        None => text.replace(old, new),
    };
    ctx.tree.set_content(id, updated)?;
    Ok(ExecResult::success(""))
}
