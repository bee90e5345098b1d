//! Side effects run after linking (activate) or before unlinking (deactivate).
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::tasks::Context;

const VIM_PLUG_URL: &str = "https://raw.githubusercontent.com/junegunn/vim-plug/master/plug.vim";
const ZINIT_INSTALL_URL: &str = "https://git.io/zinit-install";

/// XDG base directories created by [`Hook::XdgHome`], relative to home.
const XDG_DIRS: &[&str] = &[
    ".local/bin",
    ".cache",
    ".config",
    ".local/share",
    ".local/state",
];

/// Closed set of hook behaviours a cookbook or recipe can carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Hook {
    #[default]
    Noop,
    /// Create the XDG base directories.
    XdgHome,
    /// Alias `~/Library/ApplicationSupport` to `~/Library/Application Support`.
    LibraryAlias,
    /// Download vim-plug and install plugins.
    VimPlug,
    /// Install zinit and update zsh plugins.
    Zinit,
    /// `brew bundle install` the linked Brewfile.
    BrewBundle,
    /// Create tig's history file.
    TigHistory,
}

impl Hook {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::XdgHome => "xdg-home",
            Self::LibraryAlias => "library-alias",
            Self::VimPlug => "vim-plug",
            Self::Zinit => "zinit",
            Self::BrewBundle => "brew-bundle",
            Self::TigHistory => "tig-history",
        }
    }

    /// Run the hook's activation side effects.
    ///
    /// A missing external tool is warned about and skipped, never an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a filesystem mutation fails or an invoked
    /// command exits non-zero.
    pub fn activate(self, ctx: &Context) -> Result<()> {
        match self {
            Self::Noop => Ok(()),
            Self::XdgHome => xdg_home(ctx),
            Self::LibraryAlias => library_alias(ctx),
            Self::VimPlug => vim_plug(ctx),
            Self::Zinit => zinit(ctx),
            Self::BrewBundle => brew_bundle(ctx),
            Self::TigHistory => tig_history(ctx),
        }
    }

    /// Run the hook's deactivation side effects.
    ///
    /// Installed tooling (plugins, kegs, XDG directories) is user state and
    /// is left in place.
    ///
    /// # Errors
    ///
    /// Currently infallible; the signature mirrors [`activate`](Self::activate).
    pub fn deactivate(self, ctx: &Context) -> Result<()> {
        if self != Self::Noop {
            ctx.log
                .debug(&format!("{}: nothing to deactivate", self.name()));
        }
        Ok(())
    }
}

fn xdg_home(ctx: &Context) -> Result<()> {
    for dir in XDG_DIRS {
        let path = ctx.home.join(dir);
        if path.is_dir() {
            ctx.log
                .debug(&format!("Directory already exists: {}", path.display()));
        } else {
            ctx.mkdirp(&path)?;
        }
    }
    Ok(())
}

fn library_alias(ctx: &Context) -> Result<()> {
    let target = ctx.home.join("Library/Application Support");
    let alias = ctx.home.join("Library/ApplicationSupport");

    if alias.symlink_metadata().is_ok() {
        ctx.log
            .info(&format!("Symlink already exists: {}", alias.display()));
        return Ok(());
    }
    if !target.is_dir() {
        ctx.log
            .info(&format!("Directory not found: {}", target.display()));
        return Ok(());
    }
    ctx.symlink(&target, &alias)
}

fn vim_plug(ctx: &Context) -> Result<()> {
    let plug = ctx.home.join(".vim/autoload/plug.vim");
    if plug.is_file() {
        ctx.log
            .info(&format!("vim-plug already installed: {}", plug.display()));
    } else if ctx.executor.which("curl") {
        let out = plug.to_string_lossy();
        ctx.call("curl", &["-fsSL", "-o", &out, "--create-dirs", VIM_PLUG_URL])?;
    } else {
        ctx.log.warn("skip downloading vim-plug. command not found: curl");
        return Ok(());
    }

    if !ctx.executor.which("vim") {
        ctx.log
            .warn("skip updating vim plugins. command not found: vim");
        return Ok(());
    }
    ctx.call("vim", &["-es", "+PlugInstall", "+qall"])
}

fn zinit(ctx: &Context) -> Result<()> {
    let installed = ctx.home.join(".local/share/zinit/zinit.git");
    if installed.is_dir() {
        ctx.log
            .info(&format!("zinit already installed: {}", installed.display()));
    } else if ctx.executor.which("curl") {
        let script =
            format!("NO_EMOJI=1 NO_EDIT=1 NO_TUTORIAL=1 sh -c \"$(curl -fsSL {ZINIT_INSTALL_URL})\"");
        ctx.call("sh", &["-c", &script])?;
    } else {
        ctx.log.warn("skip installing zinit. command not found: curl");
        return Ok(());
    }

    if !ctx.executor.which("zsh") {
        ctx.log
            .warn("skip updating zsh plugins. command not found: zsh");
        return Ok(());
    }
    ctx.call("zsh", &["-i", "-c", "zinit update --all"])
}

fn tig_history(ctx: &Context) -> Result<()> {
    let history = ctx.home.join(".local/share/tig/history");
    if let Some(parent) = history.parent()
        && !parent.is_dir()
    {
        ctx.mkdirp(parent)?;
    }
    if history.exists() {
        ctx.log
            .debug(&format!("File already exists: {}", history.display()));
        return Ok(());
    }
    ctx.touch(&history)
}

/// A Homebrew formula or cask, compared by its short name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keg {
    pub name: String,
}

impl Keg {
    /// Strip any `tap/` qualifier so `homebrew/cask/iterm2` equals `iterm2`.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim();
        let name = raw.rsplit('/').next().unwrap_or(raw);
        Self {
            name: name.to_string(),
        }
    }

    /// One keg per non-empty line of `brew` output.
    #[must_use]
    pub fn parse_list(stdout: &str) -> BTreeSet<Self> {
        stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(Self::new)
            .collect()
    }
}

/// Declared kegs that are not installed yet.
#[must_use]
pub fn pending_kegs(declared: &BTreeSet<Keg>, installed: &BTreeSet<Keg>) -> Vec<Keg> {
    declared.difference(installed).cloned().collect()
}

fn brewfile(home: &Path) -> PathBuf {
    home.join(".config/homebrew/Brewfile")
}

fn brew_bundle(ctx: &Context) -> Result<()> {
    if !ctx.executor.which("brew") {
        ctx.log.warn("skip bundle. command not found: brew");
        return Ok(());
    }

    let file = brewfile(&ctx.home);
    if !file.exists() {
        ctx.log
            .info(&format!("skip bundle. file not found: {}", file.display()));
        return Ok(());
    }
    let file_arg = file.to_string_lossy();

    // Read-only queries; they run in dry-run mode too.
    let declared = ctx
        .executor
        .run_unchecked(
            "brew",
            &["bundle", "list", "--file", &file_arg, "--formula", "--cask"],
        )?;
    let installed = ctx.executor.run_unchecked("brew", &["list", "-1"])?;

    if declared.success && installed.success {
        let declared = Keg::parse_list(&declared.stdout);
        let pending = pending_kegs(&declared, &Keg::parse_list(&installed.stdout));
        if pending.is_empty() {
            ctx.log.info(&format!(
                "All {} kegs already installed",
                declared.len()
            ));
            return Ok(());
        }
        let names: Vec<&str> = pending.iter().map(|k| k.name.as_str()).collect();
        ctx.log
            .info(&format!("{} kegs pending: {}", names.len(), names.join(", ")));
    }

    ctx.call("brew", &["bundle", "install", "--file", &file_arg])
}
