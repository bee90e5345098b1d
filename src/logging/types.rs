//! Core logging types: cookbook entries, status, and the [`Log`] trait.

/// Cookbook result for summary reporting.
#[derive(Debug, Clone)]
pub struct BookEntry {
    /// Cookbook name as shown in the stage banner.
    pub name: String,
    /// Final status of the cookbook.
    pub status: BookStatus,
    /// Optional detail message (change counts or error description).
    pub message: Option<String>,
}

/// Status of a processed cookbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookStatus {
    /// Every chain, snippet and hook completed.
    Ok,
    /// Nothing in the cookbook applied on this machine.
    Skipped,
    /// Cookbook ran in dry-run mode; no changes were applied.
    DryRun,
    /// An error aborted the cookbook.
    Failed,
}

impl BookStatus {
    /// Summary marker and its ANSI colour.
    #[must_use]
    pub const fn marker(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "\x1b[32m"),
            Self::Skipped => ("○", "\x1b[33m"),
            Self::DryRun => ("~", "\x1b[37m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) is the only production implementation;
/// engine code takes `&dyn Log` so it never depends on the output format.
pub trait Log: Send + Sync {
    /// Log a stage header (cookbook banner).
    fn stage(&self, msg: &str);
    /// Log a shell-equivalent line for a mutation about to happen.
    fn trace(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run notice.
    fn dry_run(&self, msg: &str);
    /// Record a cookbook result for the summary.
    fn record_book(&self, name: &str, status: BookStatus, message: Option<&str>);
}
