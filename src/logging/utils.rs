//! Helpers shared by the console and file layers.
use std::path::PathBuf;

/// Remove CSI escape sequences (`ESC [ ... final`) from `s`.
///
/// `list` colours and summary markers must never reach the log file. A
/// lone `ESC` followed by anything other than `[` is dropped together with
/// that character.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next() != Some('[') {
            continue;
        }
        // Parameters and intermediates, then one final byte in `@`..=`~`.
        for inner in chars.by_ref() {
            if ('@'..='~').contains(&inner) {
                break;
            }
        }
    }
    out
}

/// `$XDG_CACHE_HOME`, else `$HOME/.cache`, else `./.cache`.
fn cache_root() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CACHE_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg);
    }
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
        .join(".cache")
}

/// `<cache>/xake/<command>.log`, with the directory created.
///
/// `None` when the directory cannot be created; file logging is then off.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let dir = cache_root().join("xake");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time rendered with a `chrono` format string.
pub(super) fn utc_now(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}

pub(super) const DATETIME: &str = "%Y-%m-%d %H:%M:%S";
pub(super) const TIME: &str = "%H:%M:%S";

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn strips_list_colours() {
        assert_eq!(strip_ansi("\x1b[35m~/.vimrc\x1b[0m"), "~/.vimrc");
        assert_eq!(strip_ansi("~/.tmux.conf"), "~/.tmux.conf");
    }

    #[test]
    fn strips_banner_styling() {
        assert_eq!(
            strip_ansi("\x1b[1;34m==>\x1b[0m \x1b[1mzsh (04/12)\x1b[0m"),
            "==> zsh (04/12)"
        );
    }

    #[test]
    fn strips_non_sgr_sequences() {
        assert_eq!(strip_ansi("\x1b[2Kcleanup"), "cleanup");
        assert_eq!(strip_ansi("\x1bMlink"), "link");
        assert_eq!(strip_ansi(""), "");
    }

    #[test]
    fn log_path_is_named_after_command() {
        let path = log_file_path("unlink").expect("cache dir should be creatable");
        assert!(path.ends_with("xake/unlink.log"));
    }

    #[test]
    fn timestamps_use_requested_layout() {
        let time = utc_now(TIME);
        assert_eq!(time.len(), 8);
        assert_eq!(time.matches(':').count(), 2);

        let datetime = utc_now(DATETIME);
        assert_eq!(datetime.len(), 19);
        assert_eq!(&datetime[10..11], " ");
    }
}
