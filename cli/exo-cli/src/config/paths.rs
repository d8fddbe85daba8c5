// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Configuration file discovery
//!
//! The file is named `exoscale.<ext>` and is searched, in order, in
//! `~/.exoscale/`, `~/` and the current directory.

use std::path::{Path, PathBuf};

use super::ConfigError;

/// Base name of the configuration file
pub const CONFIG_BASENAME: &str = "exoscale";

/// Recognised extensions, in lookup order
pub const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Dedicated configuration directory (`~/.exoscale`)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".exoscale"))
}

/// Directories searched for a configuration file, in priority order
pub fn candidate_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(3);
    candidates.extend(config_dir());
    candidates.extend(dirs::home_dir());
    candidates.push(PathBuf::from("."));
    candidates
}

/// Every file name tried in one directory
fn candidates_in(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    CONFIG_EXTENSIONS
        .iter()
        .map(move |ext| dir.join(format!("{}.{}", CONFIG_BASENAME, ext)))
}

/// First existing configuration file in `search`
pub fn find_config_file(search: &[PathBuf]) -> Result<PathBuf, ConfigError> {
    search
        .iter()
        .flat_map(|dir| candidates_in(dir))
        .find(|path| path.is_file())
        .ok_or_else(|| ConfigError::NotFound {
            searched: search.to_vec(),
        })
}
