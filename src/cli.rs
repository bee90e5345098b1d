use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "xake",
    about = "Link dotfiles, merge rc snippets, run bootstrap hooks",
    version = crate::commands::version::VERSION
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Override the repository root (must contain static/)
    #[arg(long, global = true)]
    pub root: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every managed destination
    List(ListOpts),
    /// Symlink dotfiles, enable snippets and activate hooks
    Link(LinkOpts),
    /// Remove symlinks and snippets created by link
    Unlink(UnlinkOpts),
    /// Remove dangling symlinks under managed destinations
    Cleanup(RunOpts),
    /// Print a shell completion script
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file (`<name>.log`).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Link(_) => "link",
            Self::Unlink(_) => "unlink",
            Self::Cleanup(_) => "cleanup",
            Self::Completion { .. } => "completion",
            Self::Version => "version",
        }
    }

    /// Whether `-v` was given to a subcommand that accepts it.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        match self {
            Self::Link(opts) => opts.run.verbose,
            Self::Unlink(opts) => opts.run.verbose,
            Self::Cleanup(run) => run.verbose,
            Self::List(_) | Self::Completion { .. } | Self::Version => false,
        }
    }
}

/// Options shared by the mutating verbs.
#[derive(Args, Debug, Clone, Default)]
pub struct RunOpts {
    /// Show what would be done without changing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Cookbook names or aliases to act on (default: all)
    pub intents: Vec<String>,
}

/// Options for the `link` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct LinkOpts {
    /// Do not remove dangling symlinks first
    #[arg(long)]
    pub skip_cleanup: bool,

    /// Do not run cookbook hooks
    #[arg(long)]
    pub skip_activate: bool,

    #[command(flatten)]
    pub run: RunOpts,
}

/// Options for the `unlink` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct UnlinkOpts {
    /// Do not remove dangling symlinks first
    #[arg(long)]
    pub skip_cleanup: bool,

    /// Do not run cookbook deactivation hooks
    #[arg(long)]
    pub skip_deactivate: bool,

    #[command(flatten)]
    pub run: RunOpts,
}

/// Options for the `list` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ListOpts {
    /// Also show each destination's source
    #[arg(short, long)]
    pub long: bool,

    /// When to colour destinations by state
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

/// Colour policy for `list`.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colour when writing to a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    #[must_use]
    pub const fn enabled(self, is_terminal: bool) -> bool {
        match self {
            Self::Auto => is_terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }
}
