//! Removal of dangling symlinks under managed destinations.
use std::path::PathBuf;

use anyhow::Result;
use walkdir::WalkDir;

use super::{Context, RunSummary, TaskResult, TaskStats, execute};
use crate::cookbooks::CookBook;
use crate::resources::symlink::is_dangling;

/// Dangling symlinks at, or anywhere beneath, the destination of every
/// non-private recipe. Sorted and deduplicated.
#[must_use]
pub fn find_broken(books: &[CookBook], ctx: &Context) -> Vec<PathBuf> {
    let mut broken = Vec::new();
    for recipe in books.iter().flat_map(CookBook::public_recipes) {
        let dest = recipe.resolved_dest(&ctx.home);
        if is_dangling(&dest) {
            broken.push(dest);
            continue;
        }
        let is_real_dir = dest
            .symlink_metadata()
            .is_ok_and(|m| m.is_dir());
        if !is_real_dir {
            continue;
        }
        broken.extend(
            WalkDir::new(&dest)
                .follow_links(false)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|entry| entry.path_is_symlink() && is_dangling(entry.path()))
                .map(walkdir::DirEntry::into_path),
        );
    }
    broken.sort();
    broken.dedup();
    broken
}

/// Find and remove dangling symlinks.
///
/// # Errors
///
/// Returns an error if a link cannot be removed.
pub fn cleanup(books: &[CookBook], ctx: &Context) -> Result<TaskResult> {
    ctx.log.info("Scanning broken symlinks...");
    let broken = find_broken(books, ctx);
    ctx.log.info(&format!("Found {} broken symlinks", broken.len()));

    let mut stats = TaskStats::new();
    for link in &broken {
        ctx.remove(link)?;
        stats.changed += 1;
    }
    ctx.log.info(&stats.summary(ctx.dry_run));
    Ok(if ctx.dry_run {
        TaskResult::DryRun
    } else {
        TaskResult::Ok
    })
}

/// The cleanup pass as its own stage.
pub(super) fn stage(books: &[CookBook], ctx: &Context, summary: &mut RunSummary) {
    ctx.log.stage("cleanup");
    let ok = execute("cleanup", ctx, || cleanup(books, ctx));
    summary.count(ok);
}

/// The `cleanup` verb.
pub fn run(books: &[CookBook], ctx: &Context) -> RunSummary {
    let mut summary = RunSummary::default();
    stage(books, ctx, &mut summary);
    summary
}
