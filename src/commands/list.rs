//! List command implementation.
use anyhow::{Context as _, Result};
use std::io::IsTerminal;
use std::sync::Arc;

use crate::cli::{GlobalOpts, ListOpts};
use crate::logging::Logger;
use crate::tasks::list::{self, ListOptions};

/// Run the list command, writing to stdout.
///
/// # Errors
///
/// Returns an error if setup fails or stdout cannot be written.
pub fn run(global: &GlobalOpts, opts: &ListOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = super::CommandSetup::init(global, &[], false, log)?;
    let cwd = std::env::current_dir().context("reading current directory")?;

    let stdout = std::io::stdout();
    let options = ListOptions {
        long: opts.long,
        color: opts.color.enabled(stdout.is_terminal()),
    };
    list::run(&setup.books, &setup.ctx, &cwd, options, &mut stdout.lock())
}
