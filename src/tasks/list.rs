//! The `list` verb: one line per chain, sorted by destination.
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use anyhow::Result;

use super::Context;
use crate::cookbooks::{CookBook, PathChain};

const RED: &str = "\x1b[31m";
const MAGENTA: &str = "\x1b[35m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

/// How to render the listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Append ` -> <source>` to each line.
    pub long: bool,
    /// Colour destinations by their current state.
    pub color: bool,
}

/// Every chain of every book (blacklist applied), sorted by destination.
///
/// The sort is stable, so for a shared destination the identity chain
/// stays ahead of the default one.
#[must_use]
pub fn entries(books: &[CookBook], ctx: &Context) -> Vec<PathChain> {
    let mut chains: Vec<PathChain> = books
        .iter()
        .flat_map(|book| book.recipes.iter())
        .flat_map(|recipe| ctx.chains(recipe))
        .collect();
    chains.sort_by(|a, b| a.dest.cmp(&b.dest));
    chains
}

/// ANSI colour for the current state of `dest`, if any.
fn state_color(dest: &Path) -> Option<&'static str> {
    match dest.symlink_metadata() {
        Err(_) => Some(RED),
        Ok(meta) if meta.is_symlink() => Some(MAGENTA),
        Ok(meta) if meta.is_dir() => Some(BLUE),
        Ok(_) => None,
    }
}

/// `path` expressed relative to `base`, climbing with `..` where needed.
///
/// `None` when either side is relative or they share no root (another
/// drive on Windows).
fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    if !path.is_absolute() || !base.is_absolute() {
        return None;
    }
    let mut path_parts = path.components().peekable();
    let mut base_parts = base.components().peekable();
    if path_parts.peek() != base_parts.peek() {
        return None;
    }
    while let (Some(a), Some(b)) = (path_parts.peek(), base_parts.peek())
        && a == b
    {
        path_parts.next();
        base_parts.next();
    }

    let mut relative: PathBuf = base_parts.map(|_| Component::ParentDir).collect();
    relative.extend(path_parts);
    if relative.as_os_str().is_empty() {
        relative.push(Component::CurDir);
    }
    Some(relative)
}

/// Write one line per chain to `out`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render(
    chains: &[PathChain],
    cwd: &Path,
    opts: ListOptions,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    for chain in chains {
        let dest = chain.dest.display();
        match state_color(&chain.dest).filter(|_| opts.color) {
            Some(color) => write!(out, "{color}{dest}{RESET}")?,
            None => write!(out, "{dest}")?,
        }
        if opts.long {
            let source =
                relative_to(&chain.source, cwd).unwrap_or_else(|| chain.source.clone());
            write!(out, " -> {}", source.display())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// List `books` to `out`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn run(
    books: &[CookBook],
    ctx: &Context,
    cwd: &Path,
    opts: ListOptions,
    out: &mut dyn Write,
) -> Result<()> {
    let chains = entries(books, ctx);
    ctx.log.debug(&format!("{} chains", chains.len()));
    render(&chains, cwd, opts, out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::cookbooks::PathRecipe;
    use crate::platform::Identity;
    use crate::tasks::test_helpers::Sandbox;
    use std::fs;

    fn books() -> Vec<CookBook> {
        vec![
            CookBook::new("vim")
                .recipe(PathRecipe::new("vimrc", "~/.vimrc"))
                .recipe(PathRecipe::new("vim", "~/.vim")),
            CookBook::new("tmux").recipe(PathRecipe::new("tmux.conf", "~/.tmux.conf")),
        ]
    }

    fn listing(sandbox: &Sandbox, identity: Identity, opts: ListOptions) -> String {
        let ctx = sandbox.context(identity);
        let mut out = Vec::new();
        run(&books(), &ctx, sandbox.root(), opts, &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .replace(&sandbox.home().display().to_string(), "~")
    }

    #[test]
    fn sorted_by_destination_and_blacklisted() {
        let sandbox = Sandbox::new();
        sandbox.write_static("default", "vimrc", "");
        sandbox.write_static("default", "tmux.conf", "");
        sandbox.write_static("default", "vim/colors/dark.vim", "");
        sandbox.write_static("default", "vim/.dark.vim.swp", "");

        let out = listing(&sandbox, Identity::Linux, ListOptions::default());
        insta::assert_snapshot!(out, @r"
        ~/.tmux.conf
        ~/.vim/colors/dark.vim
        ~/.vimrc
        ");
    }

    #[test]
    fn long_format_shows_source_relative_to_cwd() {
        let sandbox = Sandbox::new();
        sandbox.write_static("default", "vimrc", "");
        sandbox.write_static("linux", "vimrc", "");

        let out = listing(
            &sandbox,
            Identity::Linux,
            ListOptions {
                long: true,
                color: false,
            },
        );
        assert_eq!(
            out,
            "~/.vimrc -> static/linux/vimrc\n~/.vimrc -> static/default/vimrc\n"
        );
    }

    #[test]
    #[cfg(unix)]
    fn long_format_climbs_out_of_a_sibling_cwd() {
        let sandbox = Sandbox::new();
        sandbox.write_static("default", "vimrc", "");
        let ctx = sandbox.context(Identity::Linux);
        let mut out = Vec::new();

        run(
            &books(),
            &ctx,
            &sandbox.home().join("projects"),
            ListOptions {
                long: true,
                color: false,
            },
            &mut out,
        )
        .unwrap();

        let line = String::from_utf8(out).unwrap();
        let source = line.trim_end().rsplit(" -> ").next().unwrap();
        let root_name = sandbox.root().file_name().unwrap().to_string_lossy();
        assert!(source.starts_with("../../"), "{source}");
        assert!(
            source.ends_with(&format!("{root_name}/static/default/vimrc")),
            "{source}"
        );
    }

    #[test]
    #[cfg(unix)]
    fn relative_paths() {
        let rel = |p: &str, b: &str| relative_to(Path::new(p), Path::new(b));
        assert_eq!(rel("/repo/static/vimrc", "/repo"), Some("static/vimrc".into()));
        assert_eq!(
            rel("/home/u/dots/static/vimrc", "/home/u/work"),
            Some("../dots/static/vimrc".into())
        );
        assert_eq!(
            rel("/srv/dots/vimrc", "/home/u"),
            Some("../../srv/dots/vimrc".into())
        );
        assert_eq!(rel("/repo", "/repo"), Some(".".into()));
        assert_eq!(rel("static/vimrc", "/repo"), None);
    }

    #[test]
    #[cfg(unix)]
    fn colour_reflects_destination_state() {
        let sandbox = Sandbox::new();
        sandbox.write_static("default", "vimrc", "");
        sandbox.write_static("default", "tmux.conf", "");
        sandbox.write_static("default", "vim/colors/dark.vim", "");
        std::os::unix::fs::symlink(
            sandbox.static_dir("default").join("vimrc"),
            sandbox.home().join(".vimrc"),
        )
        .unwrap();
        fs::write(sandbox.home().join(".tmux.conf"), "").unwrap();
        fs::create_dir_all(sandbox.home().join(".vim/colors/dark.vim")).unwrap();

        let out = listing(
            &sandbox,
            Identity::Linux,
            ListOptions {
                long: false,
                color: true,
            },
        );
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "~/.tmux.conf");
        assert_eq!(lines[1], format!("{BLUE}~/.vim/colors/dark.vim{RESET}"));
        assert_eq!(lines[2], format!("{MAGENTA}~/.vimrc{RESET}"));
    }

    #[test]
    fn missing_destination_is_red() {
        let sandbox = Sandbox::new();
        sandbox.write_static("default", "tmux.conf", "");
        let out = listing(
            &sandbox,
            Identity::Linux,
            ListOptions {
                long: false,
                color: true,
            },
        );
        assert_eq!(out, format!("{RED}~/.tmux.conf{RESET}\n"));
    }
}
