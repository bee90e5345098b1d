//! Link command implementation.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::{GlobalOpts, LinkOpts};
use crate::logging::Logger;
use crate::tasks::link::{self, LinkOptions};

/// Run the link command.
///
/// `--skip-*` flags switch off what `xake.toml` enables; they never switch
/// anything on.
///
/// # Errors
///
/// Returns an error if setup fails or any cookbook fails.
pub fn run(global: &GlobalOpts, opts: &LinkOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = super::CommandSetup::init(global, &opts.run.intents, opts.run.dry_run, log)?;
    let settings = &setup.ctx.config.settings.link;
    let options = LinkOptions {
        cleanup: settings.cleanup && !opts.skip_cleanup,
        activate: settings.activate && !opts.skip_activate,
    };
    let summary = link::run(&setup.books, &setup.ctx, options);
    super::finish(log, summary)
}
