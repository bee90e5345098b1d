//! Raw filesystem mutations behind [`Context`](crate::tasks::Context)'s
//! narrated primitives.
use anyhow::{Context as _, Result};
use std::fs;
use std::path::Path;

/// Create `path` and all missing ancestors.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("create directory: {}", path.display()))
}

/// Create a symlink at `link` pointing to `target`.
///
/// # Errors
///
/// Returns an error if the link cannot be created (e.g. `link` exists).
pub fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(target, link);

    #[cfg(windows)]
    let result = if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    };

    result.with_context(|| {
        format!(
            "creating symlink {} -> {}",
            link.display(),
            target.display()
        )
    })
}

/// Remove the symlink (or file) at `path` without following it.
///
/// # Errors
///
/// Returns an error if `path` cannot be inspected or removed.
pub fn remove_link(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path)
        .with_context(|| format!("reading metadata: {}", path.display()))?;
    let result = if is_dir_like(&meta) {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    };
    result.with_context(|| format!("removing: {}", path.display()))
}

/// Replace the contents of `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("writing: {}", path.display()))
}

/// Create `path` if it does not exist, leaving existing content alone.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn touch(path: &Path) -> Result<()> {
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(drop)
        .with_context(|| format!("touching: {}", path.display()))
}

/// On Windows, `symlink_metadata().is_dir()` is `false` for directory
/// symlinks, so the raw `FILE_ATTRIBUTE_DIRECTORY` bit is checked instead.
fn is_dir_like(meta: &fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}
