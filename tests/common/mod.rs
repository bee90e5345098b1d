// Shared helpers for integration tests.
//
// Provides a temporary repository (`static/<identity>/`, `snippet/`) plus a
// temporary home directory, and a context builder wired to a recording
// executor so no real command is ever spawned.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use xake::config::Config;
use xake::cookbooks::Blacklist;
use xake::exec::{ExecResult, Executor};
use xake::logging::{Log, Logger};
use xake::platform::Identity;
use xake::tasks::Context;

/// Executor that records every command line and reports success.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock calls").clone()
    }
}

impl Executor for RecordingExecutor {
    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        let mut line = vec![program];
        line.extend_from_slice(args);
        self.calls.lock().expect("lock calls").push(line.join(" "));
        Ok(ExecResult {
            success: true,
            code: Some(0),
            ..ExecResult::default()
        })
    }

    fn which(&self, _: &str) -> bool {
        false
    }
}

/// An isolated repository and home directory, both deleted on drop.
pub struct TestRepo {
    pub root: tempfile::TempDir,
    pub home: tempfile::TempDir,
    pub executor: Arc<RecordingExecutor>,
}

impl TestRepo {
    /// Create `static/{default,linux,darwin}` and `snippet/`.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create repo dir");
        for identity in ["default", "linux", "darwin"] {
            std::fs::create_dir_all(root.path().join("static").join(identity))
                .expect("create static dir");
        }
        std::fs::create_dir_all(root.path().join("snippet")).expect("create snippet dir");
        Self {
            root,
            home: tempfile::tempdir().expect("create home dir"),
            executor: Arc::new(RecordingExecutor::default()),
        }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    pub fn static_file(&self, identity: &str, rel: &str) -> PathBuf {
        self.root().join("static").join(identity).join(rel)
    }

    /// Write `static/<identity>/<rel>`, creating parents.
    pub fn with_static(self, identity: &str, rel: &str, content: &str) -> Self {
        write(&self.static_file(identity, rel), content);
        self
    }

    /// Write `snippet/<rel>`, creating parents.
    pub fn with_snippet(self, rel: &str, content: &str) -> Self {
        write(&self.root().join("snippet").join(rel), content);
        self
    }

    /// Write `xake.toml`.
    pub fn with_settings(self, toml: &str) -> Self {
        write(&self.root().join("xake.toml"), toml);
        self
    }

    /// A context for `identity`, loading `xake.toml` the way the CLI does.
    pub fn context(&self, identity: Identity) -> Context {
        self.context_with_log(identity, Arc::new(Logger::new("test")))
    }

    pub fn context_with_log(&self, identity: Identity, log: Arc<Logger>) -> Context {
        let config = Config::load(self.root()).expect("load config");
        let blacklist = Blacklist::new(&config.settings.filter.ignore).expect("blacklist");
        Context {
            config,
            identity,
            log: log as Arc<dyn Log>,
            dry_run: false,
            home: self.home().to_path_buf(),
            executor: Arc::clone(&self.executor) as Arc<dyn Executor>,
            blacklist,
        }
    }

    pub fn dry_run_context(&self, identity: Identity) -> Context {
        let mut ctx = self.context(identity);
        ctx.dry_run = true;
        ctx
    }

    pub fn home_path(&self, rel: &str) -> PathBuf {
        self.home().join(rel)
    }

    pub fn is_symlink(&self, rel: &str) -> bool {
        self.home_path(rel)
            .symlink_metadata()
            .is_ok_and(|m| m.is_symlink())
    }

    /// Where the symlink at `~/<rel>` points.
    pub fn link_target(&self, rel: &str) -> PathBuf {
        std::fs::read_link(self.home_path(rel)).expect("read link")
    }
}

pub fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
    std::fs::write(path, content).expect("write file");
}
