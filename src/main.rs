use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use xake::cli::{Cli, Command};
use xake::commands;
use xake::logging::{Logger, init_subscriber};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    match args.command {
        Command::Completion { shell } => {
            commands::completion::run(shell);
            return Ok(());
        }
        Command::Version => {
            commands::version::run();
            return Ok(());
        }
        _ => {}
    }

    init_subscriber(args.command.verbose(), args.command.name());
    let log = Arc::new(Logger::new(args.command.name()));

    match &args.command {
        Command::List(opts) => commands::list::run(&args.global, opts, &log),
        Command::Link(opts) => commands::link::run(&args.global, opts, &log),
        Command::Unlink(opts) => commands::unlink::run(&args.global, opts, &log),
        Command::Cleanup(opts) => commands::cleanup::run(&args.global, opts, &log),
        Command::Completion { .. } | Command::Version => Ok(()),
    }
}
