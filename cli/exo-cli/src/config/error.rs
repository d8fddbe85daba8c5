// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Configuration errors

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while locating, loading or selecting an account
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration file exists at any searched location
    #[error("no configuration file found (searched {})", join_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    /// The configuration file exists but could not be read or parsed
    #[error("couldn't read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },

    /// The configuration parsed but its content is inconsistent
    #[error("invalid config {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },

    /// The requested (or default) account is not in the configuration
    #[error("couldn't find any account with name: {0:?}")]
    AccountNotFound(String),

    /// Neither `--account` nor a default account is set
    #[error("default account not defined")]
    NoDefaultAccount,
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ConfigError {
    pub fn read(path: &Path, source: config::ConfigError) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }
}
