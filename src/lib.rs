//! Personal preference provisioning.
//!
//! Symlinks files from a versioned repository (`static/<identity>/` layered
//! over `static/default/`) into the home directory, merges small text
//! snippets into shell rc files, and runs bootstrap hooks for tools such as
//! vim-plug, zinit and Homebrew.
//!
//! The public API is organised into four layers:
//!
//! - **[`cookbooks`]**: recipes, snippets, hooks and the cookbook registry
//! - **[`resources`]**: idempotent `check + apply` primitives (symlinks, snippets)
//! - **[`tasks`]**: the link, unlink, cleanup and list verbs over a set of cookbooks
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod cookbooks;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod resources;
pub mod tasks;
