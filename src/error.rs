//! Domain-specific error types for xake.
//!
//! Internal modules return typed errors (e.g., [`ConfigError`], [`HookError`])
//! while command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! XakeError
//! ├── Config(ConfigError): root resolution, xake.toml, home directory
//! ├── Recipe(RecipeError): ignore patterns, snippet sources
//! └── Hook(HookError): external commands run by cookbook hooks
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for xake.
#[derive(Error, Debug)]
pub enum XakeError {
    /// Configuration-related error (root, settings, environment).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Recipe-related error (patterns, snippet sources).
    #[error("Recipe error: {0}")]
    Recipe(#[from] RecipeError),

    /// A hook failed to run an external command.
    #[error("Hook error: {0}")]
    Hook(#[from] HookError),
}

/// Errors that arise while locating the repository and loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No candidate directory contained a `static/` tree.
    #[error("cannot determine repository root. Use --root or set XAKE_ROOT")]
    RootNotFound,

    /// An explicitly requested root has no `static/` directory.
    #[error("not a xake repository (missing static/): {}", .0.display())]
    MissingStaticDir(PathBuf),

    /// `xake.toml` could not be parsed.
    #[error("Invalid settings in {}: {message}", .path.display())]
    InvalidSettings {
        /// Path of the settings file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// An I/O error occurred while reading a settings file.
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Neither `HOME` nor `USERPROFILE` is set.
    #[error("HOME environment variable is not set")]
    HomeNotSet,
}

/// Errors that arise from recipe definitions.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// An ignore pattern is not a valid glob.
    #[error("Invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Parser message.
        message: String,
    },

    /// A snippet source exists but could not be read.
    #[error("Cannot read snippet {}: {source}", .path.display())]
    SnippetUnreadable {
        /// Path of the snippet file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors raised by external commands run from hooks.
#[derive(Error, Debug)]
pub enum HookError {
    /// The command ran but exited non-zero.
    #[error("`{command}` failed (exit {code}): {stderr}")]
    CommandFailed {
        /// Command line as narrated.
        command: String,
        /// Exit code, `-1` when terminated by a signal.
        code: i32,
        /// Trimmed standard error.
        stderr: String,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn config_error_root_not_found_display() {
        assert_eq!(
            ConfigError::RootNotFound.to_string(),
            "cannot determine repository root. Use --root or set XAKE_ROOT"
        );
    }

    #[test]
    fn config_error_missing_static_display() {
        let e = ConfigError::MissingStaticDir(PathBuf::from("/tmp/repo"));
        assert_eq!(
            e.to_string(),
            "not a xake repository (missing static/): /tmp/repo"
        );
    }

    #[test]
    fn config_error_invalid_settings_display() {
        let e = ConfigError::InvalidSettings {
            path: PathBuf::from("/repo/xake.toml"),
            message: "expected a boolean".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid settings in /repo/xake.toml: expected a boolean"
        );
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: PathBuf::from("/repo/xake.toml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("/repo/xake.toml"));
    }

    #[test]
    fn recipe_error_invalid_pattern_display() {
        let e = RecipeError::InvalidPattern {
            pattern: "[".to_string(),
            message: "invalid range pattern".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid ignore pattern '[': invalid range pattern"
        );
    }

    #[test]
    fn hook_error_command_failed_display() {
        let e = HookError::CommandFailed {
            command: "brew bundle install".to_string(),
            code: 1,
            stderr: "Brewfile not found".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "`brew bundle install` failed (exit 1): Brewfile not found"
        );
    }

    #[test]
    fn xake_error_from_sub_errors() {
        let e: XakeError = ConfigError::HomeNotSet.into();
        assert!(e.to_string().starts_with("Configuration error"));

        let e: XakeError = RecipeError::InvalidPattern {
            pattern: "[".to_string(),
            message: "bad".to_string(),
        }
        .into();
        assert!(e.to_string().starts_with("Recipe error"));

        let e: XakeError = HookError::CommandFailed {
            command: "vim".to_string(),
            code: 2,
            stderr: String::new(),
        }
        .into();
        assert!(e.to_string().starts_with("Hook error"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<XakeError>();
        assert_send_sync::<ConfigError>();
        assert_send_sync::<RecipeError>();
        assert_send_sync::<HookError>();
    }

    #[test]
    fn errors_convert_to_anyhow() {
        let _config: anyhow::Error = ConfigError::RootNotFound.into();
        let _xake: anyhow::Error = XakeError::from(ConfigError::HomeNotSet).into();
    }
}
