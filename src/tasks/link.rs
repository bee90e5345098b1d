//! The `link` verb: symlink chains, enable snippets, activate hooks.
use anyhow::Result;

use super::{Context, RunSummary, TaskResult, TaskStats, cleanup, run_books};
use crate::cookbooks::CookBook;
use crate::resources::snippet::SnippetResource;
use crate::resources::symlink::SymlinkResource;

/// Switches for one link run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkOptions {
    /// Remove dangling symlinks first.
    pub cleanup: bool,
    /// Run cookbook hooks after linking.
    pub activate: bool,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            cleanup: true,
            activate: true,
        }
    }
}

/// Link one cookbook: recipe chains (identity tree before default), then
/// snippets, then hooks.
///
/// # Errors
///
/// Returns an error if a filesystem mutation or hook command fails.
pub fn link_book(book: &CookBook, ctx: &Context, activate: bool) -> Result<TaskStats> {
    let mut stats = TaskStats::new();
    for recipe in &book.recipes {
        for chain in ctx.chains(recipe) {
            stats.apply(&SymlinkResource::from(chain), ctx)?;
        }
    }
    for snippet in &book.snippets {
        if let Some(chain) = ctx.snippet_chain(snippet) {
            stats.apply(&SnippetResource::from(chain), ctx)?;
        }
    }
    if activate {
        book.activate(ctx)?;
    }
    Ok(stats)
}

/// Link `books` in order, each under its own banner.
///
/// A failing cookbook is recorded and the rest still run.
pub fn run(books: &[CookBook], ctx: &Context, opts: LinkOptions) -> RunSummary {
    let mut summary = RunSummary::default();
    if opts.cleanup {
        cleanup::stage(books, ctx, &mut summary);
    }
    run_books(books.iter(), ctx, &mut summary, |book| -> Result<TaskResult> {
        Ok(link_book(book, ctx, opts.activate)?.finish(book, ctx))
    });
    summary
}
