//! Structured logger with summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{BookEntry, BookStatus, Log};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness and summary collection.
///
/// Every message is also written to `$XDG_CACHE_HOME/xake/<command>.log`
/// by the file layer installed in [`init_subscriber`](super::init_subscriber),
/// regardless of the verbose flag.
#[derive(Debug)]
pub struct Logger {
    books: Mutex<Vec<BookEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display in the run summary; the file
    /// itself is opened by the subscriber.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            books: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return a clone of all recorded cookbook entries (test-only).
    #[cfg(test)]
    pub(crate) fn book_entries(&self) -> Vec<BookEntry> {
        self.books.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "xake::stage", "{msg}");
    }

    /// Log a narrated command line.
    pub fn trace(&self, msg: &str) {
        tracing::info!(target: "xake::exec", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message.
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run notice.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "xake::dry_run", "{msg}");
    }

    /// Record a cookbook result for the summary.
    pub fn record_book(&self, name: &str, status: BookStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.books.lock() {
            guard.push(BookEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the number of failed cookbooks.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.books.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|b| b.status == BookStatus::Failed)
                .count()
        })
    }

    /// Print one line per recorded cookbook, then the totals and the log path.
    pub fn print_summary(&self) {
        let Ok(books) = self.books.lock().map(|guard| guard.clone()) else {
            return;
        };
        if books.is_empty() {
            return;
        }

        self.stage("Summary");
        let (mut ok, mut skipped, mut dry_run, mut failed) = (0usize, 0usize, 0usize, 0usize);
        for book in &books {
            let (icon, color) = book.status.marker();
            match book.status {
                BookStatus::Ok => ok += 1,
                BookStatus::Skipped => skipped += 1,
                BookStatus::DryRun => dry_run += 1,
                BookStatus::Failed => failed += 1,
            }
            let detail = book
                .message
                .as_deref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            self.info(&format!("{color}{icon} {}{detail}\x1b[0m", book.name));
        }

        self.info(&format!(
            "{} cookbooks: \x1b[32m{ok} ok\x1b[0m, \x1b[33m{skipped} skipped\x1b[0m, \x1b[37m{dry_run} dry-run\x1b[0m, \x1b[31m{failed} failed\x1b[0m",
            books.len()
        ));
        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, trace, info, debug, warn, error, dry_run);

    fn record_book(&self, name: &str, status: BookStatus, message: Option<&str>) {
        self.record_book(name, status, message);
    }
}
