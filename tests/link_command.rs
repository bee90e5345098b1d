#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `link` verb.
#![cfg(unix)]

mod common;

use common::*;
use xake::cookbooks::{CookBook, PathRecipe, Registry, SnippetRecipe};
use xake::platform::Identity;
use xake::tasks::RunSummary;
use xake::tasks::link::{self, LinkOptions};

const NO_HOOKS: LinkOptions = LinkOptions {
    cleanup: true,
    activate: false,
};

fn vim() -> CookBook {
    CookBook::new("vim")
        .recipe(PathRecipe::new("vimrc", "~/.vimrc"))
        .recipe(PathRecipe::new("vim", "~/.vim"))
}

fn bash() -> CookBook {
    CookBook::new("bash")
        .recipe(PathRecipe::new("bash.d", "~/.bash.d"))
        .snippet(SnippetRecipe::new("bashrc", "~/.bashrc"))
}

// ---------------------------------------------------------------------------
// Symlinks
// ---------------------------------------------------------------------------

#[test]
fn vimrc_is_linked_into_home() {
    let repo = TestRepo::new().with_static("default", "vimrc", "set nu\n");
    let ctx = repo.context(Identity::Linux);

    let summary = link::run(&[vim()], &ctx, NO_HOOKS);

    assert_eq!(summary, RunSummary { ran: 2, failed: 0 });
    assert_eq!(repo.link_target(".vimrc"), repo.static_file("default", "vimrc"));
}

#[test]
fn identity_tree_is_preferred_over_default() {
    let repo = TestRepo::new()
        .with_static("default", "vimrc", "default\n")
        .with_static("darwin", "vimrc", "darwin\n")
        .with_static("linux", "vimrc", "linux\n");

    let ctx = repo.context(Identity::Darwin);
    link::run(&[vim()], &ctx, NO_HOOKS);

    assert_eq!(repo.link_target(".vimrc"), repo.static_file("darwin", "vimrc"));
}

#[test]
fn directories_are_linked_file_by_file() {
    let repo = TestRepo::new()
        .with_static("default", "vim/colors/dark.vim", "")
        .with_static("linux", "vim/ftplugin/rust.vim", "");
    let ctx = repo.context(Identity::Linux);

    link::run(&[vim()], &ctx, NO_HOOKS);

    assert!(repo.home_path(".vim").is_dir());
    assert!(!repo.is_symlink(".vim"));
    assert!(repo.is_symlink(".vim/colors/dark.vim"));
    assert_eq!(
        repo.link_target(".vim/ftplugin/rust.vim"),
        repo.static_file("linux", "vim/ftplugin/rust.vim")
    );
}

#[test]
fn blacklisted_files_are_never_linked() {
    let repo = TestRepo::new()
        .with_static("default", "vim/colors/dark.vim", "")
        .with_static("default", "vim/colors/.dark.vim.swp", "")
        .with_static("default", "vim/.DS_Store", "");
    let ctx = repo.context(Identity::Linux);

    link::run(&[vim()], &ctx, NO_HOOKS);

    assert!(repo.is_symlink(".vim/colors/dark.vim"));
    assert!(!repo.home_path(".vim/colors/.dark.vim.swp").exists());
    assert!(!repo.home_path(".vim/.DS_Store").exists());
}

#[test]
fn extra_ignore_patterns_come_from_settings() {
    let repo = TestRepo::new()
        .with_settings("[filter]\nignore = [\"*.local\"]\n")
        .with_static("default", "vim/plugins.vim", "")
        .with_static("default", "vim/plugins.local", "");
    let ctx = repo.context(Identity::Linux);

    link::run(&[vim()], &ctx, NO_HOOKS);

    assert!(repo.is_symlink(".vim/plugins.vim"));
    assert!(!repo.home_path(".vim/plugins.local").exists());
}

#[test]
fn existing_user_file_is_not_clobbered() {
    let repo = TestRepo::new().with_static("default", "vimrc", "set nu\n");
    write(&repo.home_path(".vimrc"), "mine\n");
    let ctx = repo.context(Identity::Linux);

    let summary = link::run(&[vim()], &ctx, NO_HOOKS);

    assert_eq!(summary.failed, 0);
    assert!(!repo.is_symlink(".vimrc"));
    assert_eq!(
        std::fs::read_to_string(repo.home_path(".vimrc")).unwrap(),
        "mine\n"
    );
}

#[test]
fn linking_twice_is_idempotent() {
    let repo = TestRepo::new()
        .with_static("default", "vimrc", "")
        .with_static("default", "vim/colors/dark.vim", "")
        .with_static("default", "bash.d/aliases.sh", "")
        .with_snippet("bashrc", "source ~/.bash.d/init.sh");
    write(&repo.home_path(".bashrc"), "export EDITOR=vim\n");
    let ctx = repo.context(Identity::Linux);
    let books = [vim(), bash()];

    link::run(&books, &ctx, NO_HOOKS);
    let first = std::fs::read_to_string(repo.home_path(".bashrc")).unwrap();
    let summary = link::run(&books, &ctx, NO_HOOKS);
    let second = std::fs::read_to_string(repo.home_path(".bashrc")).unwrap();

    assert_eq!(summary.failed, 0);
    assert_eq!(first, second);
    assert_eq!(second, "export EDITOR=vim\nsource ~/.bash.d/init.sh\n");
    assert!(repo.is_symlink(".bash.d/aliases.sh"));
}

// ---------------------------------------------------------------------------
// Dry run and hooks
// ---------------------------------------------------------------------------

#[test]
fn dry_run_touches_nothing() {
    let repo = TestRepo::new()
        .with_static("default", "vimrc", "")
        .with_static("default", "bash.d/aliases.sh", "")
        .with_snippet("bashrc", "source ~/.bash.d/init.sh");
    let ctx = repo.dry_run_context(Identity::Linux);

    let summary = link::run(&[vim(), bash()], &ctx, LinkOptions::default());

    assert_eq!(summary, RunSummary { ran: 3, failed: 0 });
    assert!(!repo.home_path(".vimrc").exists());
    assert!(!repo.home_path(".bash.d").exists());
    assert!(!repo.home_path(".bashrc").exists());
    assert!(repo.executor.calls().is_empty());
}

#[test]
fn activation_hook_creates_xdg_directories() {
    let repo = TestRepo::new();
    let ctx = repo.context(Identity::Linux);
    let books = Registry::build(Identity::Linux, repo.home())
        .select(&["xdg".to_string()], ctx.log.as_ref())
        .into_books();

    let summary = link::run(&books, &ctx, LinkOptions::default());

    assert_eq!(summary.failed, 0);
    for dir in [".cache", ".config", ".local/bin", ".local/share", ".local/state"] {
        assert!(repo.home_path(dir).is_dir(), "{dir} should exist");
    }
}

#[test]
fn full_registry_links_without_hooks() {
    let repo = TestRepo::new()
        .with_static("default", "vimrc", "")
        .with_static("default", "git/config", "")
        .with_static("default", "tmux.conf", "");
    let ctx = repo.context(Identity::Linux);
    let books = Registry::build(Identity::Linux, repo.home()).into_books();

    let summary = link::run(
        &books,
        &ctx,
        LinkOptions {
            cleanup: false,
            activate: false,
        },
    );

    assert_eq!(summary.failed, 0);
    assert_eq!(summary.ran, books.len());
    assert!(repo.is_symlink(".vimrc"));
    assert!(repo.is_symlink(".config/git/config"));
    assert!(repo.is_symlink(".tmux.conf"));
}
