//! Unlink command implementation.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::{GlobalOpts, UnlinkOpts};
use crate::logging::Logger;
use crate::tasks::unlink::{self, UnlinkOptions};

/// Run the unlink command.
///
/// # Errors
///
/// Returns an error if setup fails or any cookbook fails.
pub fn run(global: &GlobalOpts, opts: &UnlinkOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = super::CommandSetup::init(global, &opts.run.intents, opts.run.dry_run, log)?;
    let settings = &setup.ctx.config.settings.unlink;
    let options = UnlinkOptions {
        cleanup: settings.cleanup && !opts.skip_cleanup,
        deactivate: settings.deactivate && !opts.skip_deactivate,
    };
    let summary = unlink::run(&setup.books, &setup.ctx, options);
    super::finish(log, summary)
}
