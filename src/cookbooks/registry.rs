//! The fixed set of cookbooks, ordered pre, core, post.
use std::path::Path;

use super::{CookBook, Hook, PathRecipe, SnippetRecipe};
use crate::logging::Log;
use crate::platform::Identity;

/// Ordered cookbooks for one identity.
///
/// Link walks [`books`](Self::books) forwards; unlink walks it backwards so
/// identity overlays and late books come off first.
#[derive(Debug, Clone)]
pub struct Registry {
    books: Vec<CookBook>,
}

/// JetBrains-style IDEs: `(book name, source dir, vendor dir under ApplicationSupport)`.
const IDES: &[(&str, &str, &str)] = &[
    ("intellij-idea", "IntelliJIdea", "JetBrains"),
    ("android-studio", "AndroidStudio", "Google"),
    ("appcode", "AppCode", "JetBrains"),
    ("rubymine", "RubyMine", "JetBrains"),
    ("goland", "GoLand", "JetBrains"),
    ("clion", "CLion", "JetBrains"),
    ("rider", "Rider", "JetBrains"),
];

impl Registry {
    /// Build the registry for `identity`.
    ///
    /// Glob recipes are resolved against `home` here, so books for IDEs that
    /// were never launched come out empty.
    #[must_use]
    pub fn build(identity: Identity, home: &Path) -> Self {
        let mut books = pre(identity);
        books.extend(core());
        books.extend(post(identity, home));
        Self { books }
    }

    #[must_use]
    pub fn books(&self) -> &[CookBook] {
        &self.books
    }

    #[must_use]
    pub fn into_books(self) -> Vec<CookBook> {
        self.books
    }

    /// Keep the books any intent names; empty intents keep everything.
    ///
    /// Unknown intents are warned about and otherwise ignored.
    #[must_use]
    pub fn select(self, intents: &[String], log: &dyn Log) -> Self {
        if intents.is_empty() {
            return self;
        }
        for intent in intents {
            if !self.books.iter().any(|b| b.matches(intent)) {
                log.warn(&format!("unknown intent: {intent}"));
            }
        }
        let books = self
            .books
            .into_iter()
            .filter(|b| intents.iter().any(|i| b.matches(i)))
            .collect();
        Self { books }
    }
}

fn pre(identity: Identity) -> Vec<CookBook> {
    let mut books = vec![CookBook::new("home").alias("xdg").hook(Hook::XdgHome)];
    if identity.is_darwin() {
        books.push(
            CookBook::new("library")
                .alias("macos")
                .hook(Hook::LibraryAlias),
        );
        books.push(
            CookBook::new("brew")
                .alias("homebrew")
                .recipe(PathRecipe::new("Brewfile", "~/.config/homebrew/Brewfile"))
                .hook(Hook::BrewBundle),
        );
    }
    books
}

fn core() -> Vec<CookBook> {
    const DOCKER_ETC: &str = "/Applications/Docker.app/Contents/Resources/etc";

    vec![
        CookBook::new("bin").recipe(PathRecipe::new("bin", "~/.local/bin")),
        CookBook::new("sh")
            .recipe(PathRecipe::new("sh.d", "~/.sh.d"))
            .snippet(SnippetRecipe::new("shrc", "~/.shrc")),
        CookBook::new("bash")
            .recipes([
                PathRecipe::new("bash.d", "~/.bash.d"),
                PathRecipe::new("bash_completion.d", "~/.bash_completion.d"),
                PathRecipe::new(
                    format!("{DOCKER_ETC}/docker.bash-completion"),
                    "/usr/local/etc/bash_completion.d/docker",
                ),
                PathRecipe::new(
                    format!("{DOCKER_ETC}/docker-compose.bash-completion"),
                    "/usr/local/etc/bash_completion.d/docker-compose",
                ),
                PathRecipe::new(
                    format!("{DOCKER_ETC}/docker.zsh-completion"),
                    "/usr/local/share/zsh/site-functions/_docker",
                ),
                PathRecipe::new(
                    format!("{DOCKER_ETC}/docker-compose.zsh-completion"),
                    "/usr/local/share/zsh/site-functions/_docker-compose",
                ),
            ])
            .snippet(SnippetRecipe::new("bashrc", "~/.bashrc"))
            .snippet(SnippetRecipe::new("bash_profile", "~/.bash_profile")),
        CookBook::new("zsh")
            .recipes([
                PathRecipe::new("zsh.d", "~/.zsh.d"),
                PathRecipe::new("zsh-completions", "~/.zsh-completions"),
                PathRecipe::new(
                    "/usr/local/library/Contributions/brew_zsh_completion.zsh",
                    "~/.zsh-completions/_brew",
                ),
            ])
            .snippet(SnippetRecipe::new("zshrc", "~/.zshrc"))
            .snippet(SnippetRecipe::new("zshprofile", "~/.zshprofile"))
            .hook(Hook::Zinit),
        CookBook::new("vim")
            .recipe(PathRecipe::new("vimrc", "~/.vimrc"))
            .recipe(PathRecipe::new("vim", "~/.vim").with_hook(Hook::VimPlug)),
        CookBook::new("git")
            .alias("tig")
            .recipe(PathRecipe::new("git", "~/.config/git"))
            .recipe(PathRecipe::new("tig", "~/.config/tig"))
            .hook(Hook::TigHistory),
        CookBook::new("gh")
            .alias("github")
            .recipe(PathRecipe::new("gh-extensions", "~/.local/share/gh/extensions")),
        CookBook::new("asdf").recipe(PathRecipe::new("asdf", "~/.config/asdf")),
        CookBook::new("tmux").recipe(PathRecipe::new("tmux.conf", "~/.tmux.conf")),
        CookBook::new("ranger").recipe(PathRecipe::new("ranger", "~/.config/ranger")),
        CookBook::new("gradle")
            .recipe(PathRecipe::new("gradle", "~/.gradle"))
            .private(),
    ]
}

fn post(identity: Identity, home: &Path) -> Vec<CookBook> {
    if !identity.is_darwin() {
        return Vec::new();
    }

    let mut books = vec![
        CookBook::new("xcode")
            .recipes(PathRecipe::glob("Xcode", "~/Library/Developer/Xcode", home))
            .private(),
    ];
    for (name, source, vendor) in IDES {
        let preferences = format!("~/Library/Preferences/{source}*");
        let support = format!("~/Library/ApplicationSupport/{vendor}/{source}*");
        books.push(
            CookBook::new(name)
                .alias("ide")
                .recipes(PathRecipe::glob(*source, &preferences, home))
                .recipes(PathRecipe::glob(*source, &support, home))
                .private(),
        );
    }
    books
}
