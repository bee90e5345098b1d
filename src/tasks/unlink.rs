//! The `unlink` verb: the reverse of [`link`](super::link).
use anyhow::Result;

use super::{Context, RunSummary, TaskResult, TaskStats, cleanup, run_books};
use crate::cookbooks::CookBook;
use crate::resources::snippet::SnippetResource;
use crate::resources::symlink::SymlinkResource;

/// Switches for one unlink run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlinkOptions {
    /// Remove dangling symlinks first.
    pub cleanup: bool,
    /// Run cookbook deactivation hooks first.
    pub deactivate: bool,
}

impl Default for UnlinkOptions {
    fn default() -> Self {
        Self {
            cleanup: true,
            deactivate: true,
        }
    }
}

/// Unlink one cookbook: hooks, then snippets, then recipe chains.
///
/// Chains are visited identity tree first, same as linking, so the overlay
/// link is the one removed and the default chain then finds nothing left.
///
/// # Errors
///
/// Returns an error if a filesystem mutation or hook fails.
pub fn unlink_book(book: &CookBook, ctx: &Context, deactivate: bool) -> Result<TaskStats> {
    if deactivate {
        book.deactivate(ctx)?;
    }
    let mut stats = TaskStats::new();
    for snippet in &book.snippets {
        if let Some(chain) = ctx.snippet_chain(snippet) {
            stats.remove(&SnippetResource::from(chain), ctx)?;
        }
    }
    for recipe in &book.recipes {
        for chain in ctx.chains(recipe) {
            stats.remove(&SymlinkResource::from(chain), ctx)?;
        }
    }
    Ok(stats)
}

/// Unlink `books` in reverse order, each under its own banner.
pub fn run(books: &[CookBook], ctx: &Context, opts: UnlinkOptions) -> RunSummary {
    let mut summary = RunSummary::default();
    if opts.cleanup {
        cleanup::stage(books, ctx, &mut summary);
    }
    run_books(books.iter().rev(), ctx, &mut summary, |book| -> Result<TaskResult> {
        Ok(unlink_book(book, ctx, opts.deactivate)?.finish(book, ctx))
    });
    summary
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::cookbooks::{PathRecipe, SnippetRecipe};
    use crate::platform::Identity;
    use crate::tasks::link::link_book;
    use crate::tasks::test_helpers::Sandbox;
    use std::fs;

    fn book() -> CookBook {
        CookBook::new("vim")
            .recipe(PathRecipe::new("vimrc", "~/.vimrc"))
            .recipe(PathRecipe::new("vim", "~/.vim"))
            .snippet(SnippetRecipe::new("vimrc.local", "~/.vimrc.local"))
    }

    #[test]
    fn round_trip_restores_home() {
        let sandbox = Sandbox::new();
        sandbox.write_static("default", "vimrc", "set nu");
        sandbox.write_static("darwin", "vimrc", "set rnu");
        sandbox.write_static("default", "vim/colors/dark.vim", "");
        sandbox.write_snippet("vimrc.local", "let g:x = 1");
        fs::write(sandbox.home().join(".vimrc.local"), "\" mine\n").unwrap();
        let ctx = sandbox.context(Identity::Darwin);

        link_book(&book(), &ctx, false).unwrap();
        let stats = unlink_book(&book(), &ctx, false).unwrap();

        assert_eq!(stats.changed, 3);
        assert!(sandbox.home().join(".vimrc").symlink_metadata().is_err());
        assert!(
            sandbox
                .home()
                .join(".vim/colors/dark.vim")
                .symlink_metadata()
                .is_err()
        );
        assert_eq!(
            fs::read_to_string(sandbox.home().join(".vimrc.local")).unwrap(),
            "\" mine\n"
        );
    }

    #[test]
    fn regular_file_is_left_in_place() {
        let sandbox = Sandbox::new();
        sandbox.write_static("default", "vimrc", "set nu");
        fs::write(sandbox.home().join(".vimrc"), "mine").unwrap();
        let ctx = sandbox.context(Identity::Linux);

        let stats = unlink_book(&book(), &ctx, false).unwrap();
        assert_eq!(stats.skipped, 1);
        assert_eq!(
            fs::read_to_string(sandbox.home().join(".vimrc")).unwrap(),
            "mine"
        );
    }

    #[test]
    fn nothing_linked_is_already_removed() {
        let sandbox = Sandbox::new();
        sandbox.write_static("default", "vimrc", "set nu");
        let ctx = sandbox.context(Identity::Linux);

        let stats = unlink_book(&book(), &ctx, true).unwrap();
        assert_eq!(stats.changed, 0);
        assert_eq!(stats.already_ok, 1);
    }

    #[test]
    fn run_walks_books_in_reverse() {
        let sandbox = Sandbox::new();
        sandbox.write_static("default", "tmux.conf", "");
        sandbox.write_static("default", "vimrc", "");
        let (ctx, log) = sandbox.context_logged(Identity::Linux);
        let books = [
            CookBook::new("vim").recipe(PathRecipe::new("vimrc", "~/.vimrc")),
            CookBook::new("tmux").recipe(PathRecipe::new("tmux.conf", "~/.tmux.conf")),
        ];

        let summary = run(
            &books,
            &ctx,
            UnlinkOptions {
                cleanup: false,
                deactivate: true,
            },
        );
        assert_eq!(summary.failed, 0);
        let names: Vec<_> = log.book_entries().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["tmux", "vim"]);
    }
}
