//! Cookbooks: named bundles of recipes, snippets and hooks for one tool.
pub mod filter;
pub mod hook;
pub mod recipe;
pub mod registry;

use std::collections::BTreeSet;

use anyhow::Result;

use crate::tasks::Context;

pub use filter::Blacklist;
pub use hook::{Hook, Keg};
pub use recipe::{PathChain, PathRecipe, SnippetRecipe};
pub use registry::Registry;

/// A named bundle of recipes, snippets and an optional hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookBook {
    /// Display name used in stage banners and the run summary.
    pub name: String,
    /// Intent names that select this book; always includes the lowercase name.
    pub aliases: BTreeSet<String>,
    pub recipes: Vec<PathRecipe>,
    pub snippets: Vec<SnippetRecipe>,
    /// Private books contribute no recipes to the cleanup scan.
    pub private: bool,
    pub hook: Hook,
}

impl CookBook {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: BTreeSet::from([name.to_lowercase()]),
            recipes: Vec::new(),
            snippets: Vec::new(),
            private: false,
            hook: Hook::Noop,
        }
    }

    #[must_use]
    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.insert(alias.to_lowercase());
        self
    }

    #[must_use]
    pub fn recipe(mut self, recipe: PathRecipe) -> Self {
        self.recipes.push(recipe.private_if(self.private));
        self
    }

    #[must_use]
    pub fn recipes(mut self, recipes: impl IntoIterator<Item = PathRecipe>) -> Self {
        for recipe in recipes {
            self = self.recipe(recipe);
        }
        self
    }

    #[must_use]
    pub fn snippet(mut self, snippet: SnippetRecipe) -> Self {
        self.snippets.push(snippet);
        self
    }

    /// Mark the book, and every recipe already added, as private.
    #[must_use]
    pub fn private(mut self) -> Self {
        self.private = true;
        for recipe in &mut self.recipes {
            recipe.private = true;
        }
        self
    }

    #[must_use]
    pub const fn hook(mut self, hook: Hook) -> Self {
        self.hook = hook;
        self
    }

    /// Whether `intent` names this book (case-insensitive).
    #[must_use]
    pub fn matches(&self, intent: &str) -> bool {
        self.aliases.contains(&intent.to_lowercase())
    }

    /// Run the book's hook, then each recipe hook in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first hook failure.
    pub fn activate(&self, ctx: &Context) -> Result<()> {
        self.hook.activate(ctx)?;
        for recipe in &self.recipes {
            recipe.hook.activate(ctx)?;
        }
        Ok(())
    }

    /// Mirror of [`activate`](Self::activate), recipe hooks first.
    ///
    /// # Errors
    ///
    /// Returns the first hook failure.
    pub fn deactivate(&self, ctx: &Context) -> Result<()> {
        for recipe in self.recipes.iter().rev() {
            recipe.hook.deactivate(ctx)?;
        }
        self.hook.deactivate(ctx)
    }

    /// Whether the book or any of its recipes carries a hook.
    #[must_use]
    pub fn has_hooks(&self) -> bool {
        self.hook != Hook::Noop || self.recipes.iter().any(|r| r.hook != Hook::Noop)
    }

    /// Recipes whose destinations are scanned by cleanup.
    pub fn public_recipes(&self) -> impl Iterator<Item = &PathRecipe> {
        self.recipes.iter().filter(|r| !r.private)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn name_is_an_alias() {
        let book = CookBook::new("Vim").alias("nvim");
        assert!(book.matches("vim"));
        assert!(book.matches("VIM"));
        assert!(book.matches("nvim"));
        assert!(!book.matches("emacs"));
    }

    #[test]
    fn private_marks_recipes_added_before_and_after() {
        let book = CookBook::new("gradle")
            .recipe(PathRecipe::new("gradle", "~/.gradle"))
            .private()
            .recipe(PathRecipe::new("init.d", "~/.gradle/init.d"));
        assert!(book.recipes.iter().all(|r| r.private));
        assert_eq!(book.public_recipes().count(), 0);
    }

    #[test]
    fn public_recipes_skip_private_ones() {
        let book = CookBook::new("git")
            .recipe(PathRecipe::new("git", "~/.config/git"))
            .recipe(PathRecipe::new("secrets", "~/.secrets").private());
        let public: Vec<_> = book.public_recipes().collect();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].source, std::path::Path::new("git"));
    }
}
