//! Snippet resource: a text fragment merged into an rc file.
use anyhow::Result;
use regex::Regex;
use std::path::PathBuf;

use super::{Resource, ResourceChange, ResourceState};
use crate::cookbooks::PathChain;
use crate::error::RecipeError;
use crate::tasks::Context;

/// Snippet text kept inside `dest` by plain substring containment.
#[derive(Debug, Clone)]
pub struct SnippetResource {
    /// Snippet file under `snippet/`.
    pub source: PathBuf,
    /// The rc file the text lives in.
    pub dest: PathBuf,
}

impl From<PathChain> for SnippetResource {
    fn from(chain: PathChain) -> Self {
        Self {
            source: chain.source,
            dest: chain.dest,
        }
    }
}

impl SnippetResource {
    /// The trimmed snippet text.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::SnippetUnreadable`] if the source cannot be read.
    pub fn text(&self) -> Result<String, RecipeError> {
        std::fs::read_to_string(&self.source)
            .map(|s| s.trim().to_string())
            .map_err(|source| RecipeError::SnippetUnreadable {
                path: self.source.clone(),
                source,
            })
    }

    fn dest_content(&self) -> Result<Option<String>> {
        if !self.dest.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.dest).map_err(|source| {
            RecipeError::SnippetUnreadable {
                path: self.dest.clone(),
                source,
            }
        })?;
        Ok(Some(content))
    }

    /// A blank snippet matches everywhere, so it is never merged or stripped.
    fn is_blank(&self, text: &str, ctx: &Context) -> bool {
        if text.is_empty() {
            ctx.log
                .info(&format!("Snippet is empty: {}", self.source.display()));
        }
        text.is_empty()
    }
}

impl Resource for SnippetResource {
    fn description(&self) -> String {
        format!("{} in {}", self.source.display(), self.dest.display())
    }

    fn current_state(&self) -> Result<ResourceState> {
        let text = self.text()?;
        if text.is_empty() {
            return Ok(ResourceState::Correct);
        }
        Ok(match self.dest_content()? {
            None => ResourceState::Missing,
            Some(content) if content.contains(&text) => ResourceState::Correct,
            Some(_) => ResourceState::Incorrect {
                current: "snippet absent".to_string(),
            },
        })
    }

    fn apply(&self, ctx: &Context) -> Result<ResourceChange> {
        let text = self.text()?;
        if self.is_blank(&text, ctx) {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        let narration = format!(
            "Enable snippet {} in {}",
            self.source.display(),
            self.dest.display()
        );

        let Some(mut content) = self.dest_content()? else {
            if let Some(parent) = self.dest.parent()
                && !parent.is_dir()
            {
                ctx.mkdirp(parent)?;
            }
            ctx.write(&self.dest, &format!("{text}\n"), &narration)?;
            return Ok(ResourceChange::Applied);
        };

        if content.contains(&text) {
            ctx.log.info(&format!(
                "Snippet already enabled in file: {}",
                self.dest.display()
            ));
            return Ok(ResourceChange::AlreadyCorrect);
        }

        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(&text);
        content.push('\n');
        ctx.write(&self.dest, &content, &narration)?;
        Ok(ResourceChange::Applied)
    }

    /// Strips the text plus the newlines after it. A block the user edited
    /// no longer matches and is left as-is.
    fn remove(&self, ctx: &Context) -> Result<ResourceChange> {
        let text = self.text()?;
        if self.is_blank(&text, ctx) {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        let Some(content) = self.dest_content()? else {
            ctx.log
                .info(&format!("File not found: {}", self.dest.display()));
            return Ok(ResourceChange::AlreadyCorrect);
        };
        if !content.contains(&text) {
            ctx.log.info(&format!(
                "Snippet already disabled in file: {}",
                self.dest.display()
            ));
            return Ok(ResourceChange::AlreadyCorrect);
        }

        let pattern = Regex::new(&format!("{}\n*", regex::escape(&text)))?;
        let stripped = pattern.replace_all(&content, "");
        ctx.write(
            &self.dest,
            &stripped,
            &format!(
                "Disable snippet {} in {}",
                self.source.display(),
                self.dest.display()
            ),
        )?;
        Ok(ResourceChange::Applied)
    }
}
