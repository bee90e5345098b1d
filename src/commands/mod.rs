//! Subcommand entry points: resolve the repository, build the context, run
//! a verb, report.
pub mod cleanup;
pub mod completion;
pub mod link;
pub mod list;
pub mod unlink;
pub mod version;

use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::{self, Config};
use crate::cookbooks::{CookBook, Registry};
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger};
use crate::platform::Identity;
use crate::tasks::{Context, RunSummary};

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Context shared by every selected cookbook.
    pub ctx: Context,
    /// Selected cookbooks in registry order.
    pub books: Vec<CookBook>,
}

impl CommandSetup {
    /// Locate the repository, load `xake.toml`, detect the identity and
    /// select the cookbooks named by `intents` (all when empty).
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be found, the settings do not
    /// parse, or the home directory is unknown.
    pub fn init(
        global: &GlobalOpts,
        intents: &[String],
        dry_run: bool,
        log: &Arc<Logger>,
    ) -> Result<Self> {
        let root = config::resolve_root(global.root.as_deref())?;
        let config = Config::load(&root)?;
        let identity = Identity::detect();

        log.debug(&format!("xake {}", version::VERSION));
        log.debug(&format!("root: {}", root.display()));
        log.debug(&format!("identity: {identity}"));

        let ctx = Context::new(
            config,
            identity,
            Arc::clone(log) as Arc<dyn Log>,
            dry_run,
            Arc::new(SystemExecutor),
        )?;
        let books = Registry::build(identity, &ctx.home)
            .select(intents, log.as_ref())
            .into_books();
        log.debug(&format!("{} cookbooks selected", books.len()));

        if dry_run {
            log.dry_run("no changes will be made");
        }
        Ok(Self { ctx, books })
    }
}

/// Print the run summary and turn failed cookbooks into a non-zero exit.
///
/// # Errors
///
/// Returns an error if any cookbook failed.
pub fn finish(log: &Logger, summary: RunSummary) -> Result<()> {
    log.print_summary();
    if summary.failed > 0 {
        anyhow::bail!("{} cookbook(s) failed", summary.failed);
    }
    Ok(())
}
