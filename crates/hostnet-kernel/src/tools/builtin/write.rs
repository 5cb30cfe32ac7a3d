//! write: Replace a file's content.
//!
//! `write <file> <source>` copies the content of `source` when it is a
//! single unquoted word naming an existing file. Otherwise every word after
//! the target is joined with spaces and written as text.

use hostnet_types::ExecResult;

use super::report;
use crate::error::{Error, Result};
use crate::tools::{ExecContext, ParamSchema, ToolArgs, ToolSchema};
use crate::vfs::Content;

pub fn schema() -> ToolSchema {
    ToolSchema::new("write", "Replace a file's content with text or another file's content")
        .param(ParamSchema::required("file", "File to overwrite"))
        .param(ParamSchema::required("text|file", "Text to write, or a file to copy from"))
}

pub fn run(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> ExecResult {
    report("write", write(args, ctx))
}

fn write(args: &ToolArgs, ctx: &mut ExecContext<'_>) -> Result<ExecResult> {
    if args.len() < 2 {
        return Err(Error::BadArguments(schema().syntax()));
    }
    let target = ctx.resolve_file(args.get(0).unwrap_or_default())?;
    let content = source_content(args, ctx)?;
    ctx.tree.set_content(target, content)?;
    Ok(ExecResult::success(""))
}

fn source_content(args: &ToolArgs, ctx: &ExecContext<'_>) -> Result<Content> {
    if args.len() == 2
        && let Some(word) = args.word(1)
        && !word.quoted
        && let Ok(id) = ctx.resolve(word.as_str())
        && let Some(content) = ctx.tree.node(id)?.content()
    {
        return Ok(content.clone());
    }
    Ok(Content::Text(args.joined_from(1)))
}
