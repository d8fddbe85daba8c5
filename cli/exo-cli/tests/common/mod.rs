// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Test helpers for exo-cli integration tests

// Allow deprecated - cargo_bin is standard for CLI testing
#![allow(dead_code, deprecated, clippy::expect_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "EXOSCALE_CONFIG",
    "EXOSCALE_ACCOUNT",
    "EXOSCALE_ENDPOINT",
    "EXOSCALE_KEY",
    "EXOSCALE_SECRET",
    "EXOSCALE_MAX_PARALLEL",
    "RUST_LOG",
];

/// Scratch home and working directory, so no real configuration is found
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a configuration file into the sandbox and return its path
    pub fn write_config(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// An exo command isolated from the caller's environment
    pub fn exo(&self) -> Command {
        let mut cmd = Command::cargo_bin("exo").expect("Failed to find exo binary");
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.dir.path()).current_dir(self.dir.path());
        cmd
    }
}

pub const TWO_ACCOUNTS: &str = r#"
defaultAccount = "dev"

[[accounts]]
name = "dev"
account = "dev-org"
endpoint = "http://127.0.0.1:9/compute"
key = "EXOdev"
secret = "dev-secret"
defaultZone = "ch-gva-2"

[[accounts]]
name = "prod"
account = "prod-org"
endpoint = "http://127.0.0.1:9/compute"
key = "EXOprod"
secret = "prod-secret"
"#;
