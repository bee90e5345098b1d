//! Idempotent resource primitives (check + apply pattern).
pub mod fs;
pub mod snippet;
pub mod symlink;

use anyhow::Result;

use crate::tasks::Context;

/// State of a managed path.
///
/// # Examples
///
/// ```
/// use xake::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let wrong = ResourceState::Incorrect { current: "regular file".into() };
///
/// assert_ne!(missing, ResourceState::Correct);
/// assert_eq!(wrong, ResourceState::Incorrect { current: "regular file".into() });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing exists at the managed path.
    Missing,
    /// The managed path already holds what we would put there.
    Correct,
    /// Something the user owns occupies the managed path.
    Incorrect {
        /// What currently occupies the path.
        current: String,
    },
    /// The resource cannot be applied (e.g. its source vanished).
    Invalid {
        /// Why the resource cannot be applied.
        reason: String,
    },
}

/// Result of applying or removing a resource.
///
/// # Examples
///
/// ```
/// use xake::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let skipped = ResourceChange::Skipped { reason: "file already exists".into() };
///
/// assert_ne!(applied, ResourceChange::AlreadyCorrect);
/// assert!(matches!(skipped, ResourceChange::Skipped { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// The path was mutated (or would be, in dry run).
    Applied,
    /// Nothing to do.
    AlreadyCorrect,
    /// Left alone on purpose.
    Skipped {
        /// Why the resource was left alone.
        reason: String,
    },
}

/// A managed path that can check itself, be put in place, and be taken away.
///
/// Every mutation goes through the narrated primitives on [`Context`], so
/// implementations never need to look at `dry_run` themselves.
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Inspect the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined.
    fn current_state(&self) -> Result<ResourceState>;

    /// Bring the path into the desired state.
    ///
    /// # Errors
    ///
    /// Returns an error if a filesystem mutation fails.
    fn apply(&self, ctx: &Context) -> Result<ResourceChange>;

    /// Undo a previous [`apply`](Self::apply).
    ///
    /// # Errors
    ///
    /// Returns an error if a filesystem mutation fails.
    fn remove(&self, ctx: &Context) -> Result<ResourceChange>;
}
