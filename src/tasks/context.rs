use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::cookbooks::{Blacklist, PathChain, PathRecipe, SnippetRecipe};
use crate::error::{ConfigError, HookError, XakeError};
use crate::exec::Executor;
use crate::logging::Log;
use crate::platform::Identity;
use crate::resources::fs;

/// Shared context for cookbook execution.
///
/// Every filesystem or process mutation goes through one of the narrated
/// primitives below, which log a shell-equivalent line first and then do
/// nothing when [`dry_run`](Self::dry_run) is set.
pub struct Context {
    /// Repository root and settings.
    pub config: Config,
    /// Which `static/<identity>/` tree is layered over `static/default/`.
    pub identity: Identity,
    /// Logger for output and cookbook recording.
    pub log: Arc<dyn Log>,
    /// Whether to narrate without mutating.
    pub dry_run: bool,
    /// User's home directory path.
    pub home: PathBuf,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
    /// File-name filter applied to every chain source.
    pub blacklist: Blacklist,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("root", &self.config.root)
            .field("identity", &self.identity)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("home", &self.home)
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Creates a new context, reading the home directory from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `HOME` nor `USERPROFILE` is set, or an
    /// ignore pattern from the settings is invalid.
    pub fn new(
        config: Config,
        identity: Identity,
        log: Arc<dyn Log>,
        dry_run: bool,
        executor: Arc<dyn Executor>,
    ) -> Result<Self, XakeError> {
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::HomeNotSet)?;
        let blacklist = Blacklist::new(&config.settings.filter.ignore)?;

        Ok(Self {
            config,
            identity,
            log,
            dry_run,
            home,
            executor,
            blacklist,
        })
    }

    /// `static/<identity>` then `static/default` (once when identity is default).
    #[must_use]
    pub fn source_prefixes(&self) -> Vec<PathBuf> {
        let static_dir = self.config.static_dir();
        self.identity
            .layers()
            .into_iter()
            .map(|layer| static_dir.join(layer.as_str()))
            .collect()
    }

    /// Expand `recipe` against every prefix, identity chains first, dropping
    /// blacklisted sources.
    #[must_use]
    pub fn chains(&self, recipe: &PathRecipe) -> Vec<PathChain> {
        let prefixes = if recipe.is_absolute() {
            vec![PathBuf::new()]
        } else {
            self.source_prefixes()
        };

        prefixes
            .iter()
            .flat_map(|prefix| {
                let mut chains = recipe.expand(prefix, &self.home);
                chains.sort();
                chains
            })
            .filter(|chain| self.allows(chain))
            .collect()
    }

    /// The chain for a snippet, unless absent or blacklisted.
    #[must_use]
    pub fn snippet_chain(&self, snippet: &SnippetRecipe) -> Option<PathChain> {
        snippet
            .chain(&self.config.snippet_dir(), &self.home)
            .filter(|chain| self.allows(chain))
    }

    fn allows(&self, chain: &PathChain) -> bool {
        if self.blacklist.is_ignored(&chain.source) {
            self.log
                .debug(&format!("File ignored: {}", chain.source.display()));
            return false;
        }
        true
    }

    /// `mkdir -p <path>`
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn mkdirp(&self, path: &Path) -> Result<()> {
        self.log.trace(&format!("mkdir -p {}", quote(path)));
        if self.dry_run {
            return Ok(());
        }
        fs::create_dir_all(path)
    }

    /// `ln -s <source> <dest>`
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created.
    pub fn symlink(&self, source: &Path, dest: &Path) -> Result<()> {
        self.log
            .trace(&format!("ln -s {} {}", quote(source), quote(dest)));
        if self.dry_run {
            return Ok(());
        }
        fs::create_symlink(source, dest)
    }

    /// `rm <path>` (never recursive, never follows the link).
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be removed.
    pub fn remove(&self, path: &Path) -> Result<()> {
        self.log.trace(&format!("rm {}", quote(path)));
        if self.dry_run {
            return Ok(());
        }
        fs::remove_link(path)
    }

    /// Replace the contents of `path`, narrated as `narration`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, path: &Path, contents: &str, narration: &str) -> Result<()> {
        self.log.trace(narration);
        if self.dry_run {
            return Ok(());
        }
        fs::write_file(path, contents)
    }

    /// `touch <path>`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn touch(&self, path: &Path) -> Result<()> {
        self.log.trace(&format!("touch {}", quote(path)));
        if self.dry_run {
            return Ok(());
        }
        fs::touch(path)
    }

    /// Run an external command, failing on non-zero exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or exits non-zero.
    pub fn call(&self, program: &str, args: &[&str]) -> Result<()> {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .map(|a| quote(Path::new(a)))
            .collect::<Vec<_>>()
            .join(" ");
        self.log.trace(&line);
        if self.dry_run {
            return Ok(());
        }

        let result = self.executor.run_unchecked(program, args)?;
        if !result.success {
            return Err(HookError::CommandFailed {
                command: line,
                code: result.code.unwrap_or(-1),
                stderr: result.stderr.trim().to_string(),
            }
            .into());
        }
        for line in result.stdout.lines().filter(|l| !l.trim().is_empty()) {
            self.log.debug(line);
        }
        Ok(())
    }
}

/// Quote a path for narration when it contains shell-special characters.
fn quote(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let plain = !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+~=:,@%".contains(c));
    if plain {
        raw.into_owned()
    } else {
        format!("'{}'", raw.replace('\'', r"'\''"))
    }
}
