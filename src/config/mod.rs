pub mod settings;
pub mod toml_loader;

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub use settings::Settings;

/// Name of the optional settings file at the repository root.
pub const SETTINGS_FILE: &str = "xake.toml";

/// A located repository plus its settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute repository root.
    pub root: PathBuf,
    pub settings: Settings,
}

impl Config {
    /// Load `xake.toml` from `root` (defaults when absent).
    ///
    /// # Errors
    ///
    /// Returns an error if `root` has no `static/` directory or the settings
    /// file cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        if !root.join("static").is_dir() {
            return Err(ConfigError::MissingStaticDir(root.to_path_buf()));
        }
        let settings = toml_loader::load_config(&root.join(SETTINGS_FILE))?;
        Ok(Self {
            root: root.to_path_buf(),
            settings,
        })
    }

    /// `<root>/static`, parent of the per-identity trees.
    #[must_use]
    pub fn static_dir(&self) -> PathBuf {
        self.root.join("static")
    }

    /// `<root>/snippet`, home of rc-file snippets.
    #[must_use]
    pub fn snippet_dir(&self) -> PathBuf {
        self.root.join("snippet")
    }
}

/// Resolve the repository root.
///
/// Order: `explicit` (from `--root`), then `XAKE_ROOT`, then directories
/// relative to the running binary, then the current directory. Only
/// auto-detected candidates are required to contain `static/`; an explicit
/// root is validated later by [`Config::load`].
///
/// # Errors
///
/// Returns [`ConfigError::RootNotFound`] when nothing matches.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(root) = explicit {
        return Ok(absolute(root));
    }

    if let Ok(root) = std::env::var("XAKE_ROOT") {
        return Ok(absolute(Path::new(&root)));
    }

    let mut candidates = Vec::new();
    if let Ok(exe) = std::env::current_exe()
        && let Some(parent) = exe.parent()
    {
        candidates.push(parent.join("../..")); // target/release/ → repo root
        candidates.push(parent.join("..")); // bin/ → repo root
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }

    find_root(&candidates).ok_or(ConfigError::RootNotFound)
}

/// First candidate containing a `static/` directory, canonicalized.
fn find_root(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates
        .iter()
        .filter(|c| c.join("static").is_dir())
        .find_map(|c| std::fs::canonicalize(c).ok())
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
