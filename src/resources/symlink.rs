//! Symlink resource.
use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{Resource, ResourceChange, ResourceState};
use crate::cookbooks::PathChain;
use crate::tasks::Context;

/// A `dest -> source` symlink for one chain.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The file the link points to.
    pub source: PathBuf,
    /// Where the link lives.
    pub dest: PathBuf,
}

impl SymlinkResource {
    #[must_use]
    pub const fn new(source: PathBuf, dest: PathBuf) -> Self {
        Self { source, dest }
    }
}

impl From<PathChain> for SymlinkResource {
    fn from(chain: PathChain) -> Self {
        Self::new(chain.source, chain.dest)
    }
}

impl Resource for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.dest.display(), self.source.display())
    }

    /// Any existing symlink counts as correct; its target is not compared,
    /// so an identity overlay linked first wins over the default tree.
    fn current_state(&self) -> Result<ResourceState> {
        if !self.source.exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("File not found: {}", self.source.display()),
            });
        }
        let Ok(meta) = self.dest.symlink_metadata() else {
            return Ok(ResourceState::Missing);
        };
        if meta.is_symlink() {
            return Ok(ResourceState::Correct);
        }
        Ok(ResourceState::Incorrect {
            current: if meta.is_dir() { "directory" } else { "file" }.to_string(),
        })
    }

    fn apply(&self, ctx: &Context) -> Result<ResourceChange> {
        match self.current_state()? {
            ResourceState::Invalid { reason } => {
                ctx.log.info(&reason);
                Ok(ResourceChange::Skipped { reason })
            }
            ResourceState::Correct => {
                ctx.log
                    .info(&format!("Symlink already exists: {}", self.dest.display()));
                Ok(ResourceChange::AlreadyCorrect)
            }
            ResourceState::Incorrect { current } => {
                ctx.log
                    .info(&format!("File already exists: {}", self.dest.display()));
                Ok(ResourceChange::Skipped {
                    reason: format!("{current} in the way"),
                })
            }
            ResourceState::Missing => {
                if let Some(parent) = self.dest.parent()
                    && !parent.is_dir()
                {
                    ctx.mkdirp(parent)?;
                }
                ctx.symlink(&self.source, &self.dest)?;
                Ok(ResourceChange::Applied)
            }
        }
    }

    /// Removes any symlink at `dest` regardless of its target; refuses to
    /// touch regular files.
    fn remove(&self, ctx: &Context) -> Result<ResourceChange> {
        if !self.source.exists() {
            ctx.log
                .debug(&format!("File not found: {}", self.source.display()));
            return Ok(ResourceChange::AlreadyCorrect);
        }
        match self.dest.symlink_metadata() {
            Err(_) => {
                ctx.log
                    .info(&format!("File already removed: {}", self.dest.display()));
                Ok(ResourceChange::AlreadyCorrect)
            }
            Ok(meta) if meta.is_symlink() => {
                ctx.remove(&self.dest)?;
                Ok(ResourceChange::Applied)
            }
            Ok(_) => {
                ctx.log
                    .warn(&format!("File is not a symlink: {}", self.dest.display()));
                Ok(ResourceChange::Skipped {
                    reason: "not a symlink".to_string(),
                })
            }
        }
    }
}

/// Whether `path` is a symlink whose target does not resolve.
#[must_use]
pub fn is_dangling(path: &Path) -> bool {
    path.symlink_metadata()
        .is_ok_and(|m| m.is_symlink())
        && std::fs::metadata(path).is_err()
}
