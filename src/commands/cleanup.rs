//! Cleanup command implementation.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::{GlobalOpts, RunOpts};
use crate::logging::Logger;
use crate::tasks::cleanup;

/// Run the cleanup command.
///
/// # Errors
///
/// Returns an error if setup fails or a dangling link cannot be removed.
pub fn run(global: &GlobalOpts, opts: &RunOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = super::CommandSetup::init(global, &opts.intents, opts.dry_run, log)?;
    let summary = cleanup::run(&setup.books, &setup.ctx);
    super::finish(log, summary)
}
