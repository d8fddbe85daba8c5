// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Account selection
//!
//! Resolution order:
//! 1. `EXOSCALE_ENDPOINT`, `EXOSCALE_KEY` and `EXOSCALE_SECRET` all set:
//!    use them directly, no file is read
//! 2. load the file named by `--config` / `EXOSCALE_CONFIG`, or the first
//!    one found in the search path
//! 3. pick `--account` / `EXOSCALE_ACCOUNT`, else the default account

use std::path::{Path, PathBuf};

use exoscale_client::Credentials;
use tracing::debug;

use super::{AccountProfile, ConfigError, ConfigurationSet, paths};
use crate::invocation::AccountRequirement;

pub const ENV_ENDPOINT: &str = "EXOSCALE_ENDPOINT";
pub const ENV_KEY: &str = "EXOSCALE_KEY";
pub const ENV_SECRET: &str = "EXOSCALE_SECRET";

/// Credentials given directly through the environment
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub endpoint: Option<String>,
    pub key: Option<String>,
    pub secret: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var(ENV_ENDPOINT).ok(),
            key: std::env::var(ENV_KEY).ok(),
            secret: std::env::var(ENV_SECRET).ok(),
        }
    }

    /// Credentials, only when all three values are set and non-empty
    pub fn credentials(&self) -> Option<Credentials> {
        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
        Some(Credentials::new(
            non_empty(&self.endpoint)?,
            non_empty(&self.key)?,
            non_empty(&self.secret)?,
        ))
    }
}

/// Global options that influence selection
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountOptions<'a> {
    /// Explicit configuration file
    pub config_path: Option<&'a Path>,
    /// Explicit account name
    pub account: Option<&'a str>,
}

/// Pick the profile to use, returning its index in `config.accounts`
///
/// `requested` wins over the configuration's default account.
pub fn select_account(
    config: &ConfigurationSet,
    requested: Option<&str>,
) -> Result<usize, ConfigError> {
    let name = requested
        .filter(|n| !n.is_empty())
        .or(Some(config.default_account.as_str()).filter(|n| !n.is_empty()))
        .ok_or(ConfigError::NoDefaultAccount)?;

    config
        .position(name)
        .ok_or_else(|| ConfigError::AccountNotFound(name.to_string()))
}

/// Outcome of account resolution for this process
#[derive(Debug)]
pub enum Session {
    /// Credentials taken from the environment
    Environment(Credentials),

    /// A profile selected from a configuration file
    Configured {
        path: PathBuf,
        config: ConfigurationSet,
        /// Index of the active profile in `config.accounts`
        active: usize,
    },

    /// No account resolved; only commands that never reach the API run
    Unconfigured {
        /// Why loading failed, when it was attempted
        reason: Option<ConfigError>,
    },
}

impl Session {
    /// Resolve the account for an invocation
    ///
    /// `search` is the list of directories used when no explicit
    /// configuration file is given.
    pub fn resolve(
        requirement: AccountRequirement,
        options: AccountOptions<'_>,
        env: &EnvOverrides,
        search: &[PathBuf],
    ) -> Result<Self, ConfigError> {
        if requirement == AccountRequirement::None {
            return Ok(Self::Unconfigured { reason: None });
        }

        if let Some(credentials) = env.credentials() {
            debug!(endpoint = %credentials.endpoint, "using credentials from environment");
            return Ok(Self::Environment(credentials));
        }

        let loaded = match options.config_path {
            Some(path) if path.is_file() => Ok(path.to_path_buf()),
            Some(path) => Err(ConfigError::NotFound {
                searched: vec![path.to_path_buf()],
            }),
            None => paths::find_config_file(search),
        }
        .and_then(|path| ConfigurationSet::load(&path).map(|config| (path, config)));

        let (path, mut config) = match loaded {
            Ok(loaded) => loaded,
            Err(e) if requirement == AccountRequirement::Optional => {
                debug!(error = %e, "configuration unavailable, continuing without an account");
                return Ok(Self::Unconfigured { reason: Some(e) });
            }
            Err(e) => return Err(e),
        };

        let active = select_account(&config, options.account)?;
        // Downstream readers see the account actually in use.
        config.default_account = config.accounts[active].name.clone();
        debug!(
            path = %path.display(),
            account = %config.default_account,
            "selected account"
        );

        Ok(Self::Configured {
            path,
            config,
            active,
        })
    }

    /// The active profile, when one was selected from a file
    pub fn account(&self) -> Option<&AccountProfile> {
        match self {
            Self::Configured { config, active, .. } => config.accounts.get(*active),
            Self::Environment(_) | Self::Unconfigured { .. } => None,
        }
    }

    /// Credentials for the API client, if any account was resolved
    pub fn credentials(&self) -> Option<Credentials> {
        match self {
            Self::Environment(credentials) => Some(credentials.clone()),
            Self::Configured { .. } => self.account().map(AccountProfile::credentials),
            Self::Unconfigured { .. } => None,
        }
    }
}
