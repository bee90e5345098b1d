//! Source/destination recipes and their expansion into per-file chains.
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::hook::Hook;

/// A concrete `(source, dest)` pair: one regular file and the path its
/// symlink (or snippet target) lives at.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PathChain {
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl PathChain {
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }
}

/// Declarative mapping from a repository path to a home path.
///
/// `source` is relative to a `static/<identity>/` prefix unless absolute.
/// `dest` may start with `~`; relative destinations are taken relative to
/// the home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecipe {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub hook: Hook,
    /// Private recipes are never scanned by cleanup.
    pub private: bool,
}

impl PathRecipe {
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            hook: Hook::Noop,
            private: false,
        }
    }

    #[must_use]
    pub const fn with_hook(mut self, hook: Hook) -> Self {
        self.hook = hook;
        self
    }

    #[must_use]
    pub const fn private(mut self) -> Self {
        self.private = true;
        self
    }

    #[must_use]
    pub(crate) const fn private_if(mut self, private: bool) -> Self {
        self.private |= private;
        self
    }

    /// One recipe per existing path matching `dest_pattern`.
    ///
    /// Used for destinations whose name carries a version suffix, e.g.
    /// `~/Library/Preferences/IntelliJIdea*`. Yields nothing when the
    /// pattern is invalid or matches nothing.
    #[must_use]
    pub fn glob(source: impl Into<PathBuf>, dest_pattern: &str, home: &Path) -> Vec<Self> {
        let source = source.into();
        let pattern = expand_home(Path::new(dest_pattern), home);
        let Ok(paths) = glob::glob(&pattern.to_string_lossy()) else {
            return Vec::new();
        };
        let mut matches: Vec<PathBuf> = paths.filter_map(Result::ok).collect();
        matches.sort();
        matches
            .into_iter()
            .map(|dest| Self::new(source.clone(), dest))
            .collect()
    }

    /// Whether the source is independent of identity prefixes.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.source.is_absolute()
    }

    /// Destination with `~` expanded and made absolute against `home`.
    #[must_use]
    pub fn resolved_dest(&self, home: &Path) -> PathBuf {
        expand_home(&self.dest, home)
    }

    /// Expand into chains for every regular file under the source.
    ///
    /// A missing source yields no chains. A file source yields exactly one.
    /// A directory source yields one chain per regular file beneath it,
    /// following symlinked directories; loops are detected by `walkdir`
    /// and skipped.
    #[must_use]
    pub fn expand(&self, source_prefix: &Path, home: &Path) -> Vec<PathChain> {
        let source = source_prefix.join(expand_tilde(&self.source, home));
        let dest = self.resolved_dest(home);
        expand_pair(&source, &dest)
    }
}

/// Text merged into an rc file rather than symlinked.
///
/// `source` is relative to the snippet directory unless absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetRecipe {
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl SnippetRecipe {
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }

    /// The chain for this snippet, or `None` when the snippet file is absent.
    #[must_use]
    pub fn chain(&self, snippet_dir: &Path, home: &Path) -> Option<PathChain> {
        let source = snippet_dir.join(expand_tilde(&self.source, home));
        source
            .is_file()
            .then(|| PathChain::new(source, expand_home(&self.dest, home)))
    }
}

/// Expand a leading `~` against `home`; relative results are joined to `home`.
#[must_use]
pub fn expand_home(path: &Path, home: &Path) -> PathBuf {
    let expanded = expand_tilde(path, home);
    if expanded.is_absolute() {
        expanded
    } else {
        home.join(expanded)
    }
}

/// Expand a leading `~` against `home`, leaving other paths untouched.
fn expand_tilde(path: &Path, home: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::tilde_with_context(&*raw, || Some(home.to_string_lossy()));
    PathBuf::from(expanded.as_ref())
}

fn expand_pair(source: &Path, dest: &Path) -> Vec<PathChain> {
    let Ok(meta) = std::fs::metadata(source) else {
        return Vec::new();
    };
    if meta.is_file() {
        return vec![PathChain::new(source, dest)];
    }
    if !meta.is_dir() {
        return Vec::new();
    }

    WalkDir::new(source)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(source).ok()?;
            Some(PathChain::new(entry.path(), dest.join(relative)))
        })
        .collect()
}
