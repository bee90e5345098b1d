//! File-name blacklist applied to every chain source.
use std::path::Path;

use glob::Pattern;

use crate::error::RecipeError;

/// Patterns that never take part in link, unlink, list or snippets.
pub const DEFAULT_IGNORE: &[&str] = &["*.swp", "*.bak", ".DS_Store", ".keep", ".gitkeep"];

/// Glob patterns matched against the final path component.
#[derive(Debug, Clone)]
pub struct Blacklist {
    patterns: Vec<Pattern>,
}

impl Default for Blacklist {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_IGNORE
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect(),
        }
    }
}

impl Blacklist {
    /// The built-in patterns plus `extra`.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::InvalidPattern`] for the first extra pattern
    /// that is not a valid glob.
    pub fn new(extra: &[String]) -> Result<Self, RecipeError> {
        let mut blacklist = Self::default();
        for raw in extra {
            let pattern = Pattern::new(raw).map_err(|e| RecipeError::InvalidPattern {
                pattern: raw.clone(),
                message: e.msg.to_string(),
            })?;
            blacklist.patterns.push(pattern);
        }
        Ok(blacklist)
    }

    /// Whether `path`'s file name matches any pattern.
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.patterns.iter().any(|p| p.matches(name))
    }
}
