//! End-to-end tests for the kv binary

mod cli_basic;
mod select_cli;
mod table_cli;

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated config file and state file for one test
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "").unwrap();
        Self { dir }
    }

    pub fn with_config(config: &str) -> Self {
        let sandbox = Self::new();
        fs::write(sandbox.config_path(), config).unwrap();
        sandbox
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.path().join("state").join("table_options.json")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `kv` pointed at this sandbox's config and state file
    pub fn kv(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("kv");
        cmd.arg("--config")
            .arg(self.config_path())
            .arg("--state-file")
            .arg(self.state_path())
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn state_json(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.state_path()).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}
