//! The four verbs (link, unlink, cleanup, list) run over a list of cookbooks.
pub mod cleanup;
pub mod context;
pub mod link;
pub mod list;
pub mod unlink;

pub use context::Context;

use anyhow::Result;

use crate::cookbooks::CookBook;
use crate::logging::BookStatus;
use crate::resources::{Resource, ResourceChange};

/// Result of one cookbook (or the cleanup pass).
///
/// # Examples
///
/// ```
/// use xake::tasks::TaskResult;
///
/// let skipped = TaskResult::Skipped("nothing applies on this machine".into());
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// assert!(matches!(TaskResult::DryRun, TaskResult::DryRun));
/// ```
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Completed.
    Ok,
    /// Nothing in the cookbook exists on this machine.
    Skipped(String),
    /// Completed in dry-run mode.
    DryRun,
}

/// Counters for the chains and snippets of one cookbook.
///
/// # Examples
///
/// ```
/// use xake::tasks::TaskStats;
///
/// let stats = TaskStats { changed: 3, already_ok: 10, skipped: 0 };
/// assert_eq!(stats.summary(false), "3 changed, 10 already ok");
/// assert_eq!(stats.summary(true), "3 would change, 10 already ok");
///
/// let stats = TaskStats { changed: 1, already_ok: 2, skipped: 3 };
/// assert_eq!(stats.summary(false), "1 changed, 2 already ok, 3 skipped");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Items created, removed or rewritten.
    pub changed: u32,
    /// Items already in the desired state.
    pub already_ok: u32,
    /// Items left alone (user files in the way, vanished sources).
    pub skipped: u32,
}

impl TaskStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one resource outcome.
    pub fn record(&mut self, change: &ResourceChange) {
        match change {
            ResourceChange::Applied => self.changed += 1,
            ResourceChange::AlreadyCorrect => self.already_ok += 1,
            ResourceChange::Skipped { .. } => self.skipped += 1,
        }
    }

    /// Apply `resource` and count the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied.
    pub fn apply(&mut self, resource: &dyn Resource, ctx: &Context) -> Result<()> {
        let change = resource.apply(ctx)?;
        self.note(resource, &change, ctx);
        Ok(())
    }

    /// Remove `resource` and count the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be removed.
    pub fn remove(&mut self, resource: &dyn Resource, ctx: &Context) -> Result<()> {
        let change = resource.remove(ctx)?;
        self.note(resource, &change, ctx);
        Ok(())
    }

    fn note(&mut self, resource: &dyn Resource, change: &ResourceChange, ctx: &Context) {
        match change {
            ResourceChange::Applied => {}
            ResourceChange::AlreadyCorrect => {
                ctx.log.debug(&format!("ok: {}", resource.description()));
            }
            ResourceChange::Skipped { reason } => {
                ctx.log
                    .debug(&format!("skipping {}: {reason}", resource.description()));
            }
        }
        self.record(change);
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.changed + self.already_ok + self.skipped
    }

    /// Format the summary string (e.g. "3 changed, 10 already ok, 1 skipped").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        if self.skipped > 0 {
            format!(
                "{} {verb}, {} already ok, {} skipped",
                self.changed, self.already_ok, self.skipped
            )
        } else {
            format!("{} {verb}, {} already ok", self.changed, self.already_ok)
        }
    }

    /// Log the summary and turn it into the cookbook's result.
    ///
    /// A book with no chains, no snippets and no hooks on this machine is
    /// reported as skipped.
    #[must_use]
    pub fn finish(self, book: &CookBook, ctx: &Context) -> TaskResult {
        if self.total() == 0 && !book.has_hooks() {
            return TaskResult::Skipped("nothing applies on this machine".to_string());
        }
        ctx.log.info(&self.summary(ctx.dry_run));
        if ctx.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        }
    }
}

impl std::ops::AddAssign for TaskStats {
    fn add_assign(&mut self, other: Self) {
        self.changed += other.changed;
        self.already_ok += other.already_ok;
        self.skipped += other.skipped;
    }
}

/// Outcome of a whole verb run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Cookbooks (plus the cleanup pass) that ran.
    pub ran: usize,
    /// How many of them failed.
    pub failed: usize,
}

impl RunSummary {
    fn count(&mut self, ok: bool) {
        self.ran += 1;
        if !ok {
            self.failed += 1;
        }
    }
}

/// Run one unit of work, recording its result in the logger.
///
/// An error is logged and recorded as [`BookStatus::Failed`]; it does not
/// stop the caller. Returns whether the unit succeeded.
pub fn execute(name: &str, ctx: &Context, run: impl FnOnce() -> Result<TaskResult>) -> bool {
    match run() {
        Ok(TaskResult::Ok) => {
            ctx.log.record_book(name, BookStatus::Ok, None);
            true
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.debug(&format!("skipped: {reason}"));
            ctx.log
                .record_book(name, BookStatus::Skipped, Some(&reason));
            true
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_book(name, BookStatus::DryRun, None);
            true
        }
        Err(e) => {
            ctx.log.error(&format!("{name}: {e:#}"));
            ctx.log
                .record_book(name, BookStatus::Failed, Some(&format!("{e:#}")));
            false
        }
    }
}

/// Print `Name (03/12)` banners and [`execute`] each book in turn.
fn run_books<'a>(
    books: impl ExactSizeIterator<Item = &'a CookBook>,
    ctx: &Context,
    summary: &mut RunSummary,
    mut run: impl FnMut(&CookBook) -> Result<TaskResult>,
) {
    let total = books.len();
    for (i, book) in books.enumerate() {
        ctx.log
            .stage(&format!("{} ({:02}/{total:02})", book.name, i + 1));
        let ok = execute(&book.name, ctx, || run(book));
        summary.count(ok);
    }
}
