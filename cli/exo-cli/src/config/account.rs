// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Account profiles and the configuration document

use std::collections::HashSet;
use std::path::Path;

use exoscale_client::Credentials;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Endpoint used when a profile does not name one
pub const DEFAULT_ENDPOINT: &str = "https://api.exoscale.com/compute";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

/// A named credential set
///
/// Field names are accepted in their capitalised form (`Name`, `Key`, ...)
/// as well as lower-case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// Profile name, unique within the configuration
    #[serde(alias = "Name")]
    pub name: String,

    /// Account (organisation) name
    #[serde(default, alias = "Account")]
    pub account: String,

    /// API endpoint URL
    #[serde(default = "default_endpoint", alias = "Endpoint")]
    pub endpoint: String,

    /// API key
    #[serde(alias = "Key")]
    pub key: String,

    /// API secret
    #[serde(alias = "Secret", skip_serializing)]
    pub secret: String,

    /// Zone used when a command does not name one
    #[serde(
        default,
        rename = "defaultZone",
        alias = "DefaultZone",
        alias = "defaultzone",
        alias = "default_zone",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_zone: Option<String>,
}

impl AccountProfile {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.endpoint, &self.key, &self.secret)
    }

    pub fn default_zone(&self) -> Option<&str> {
        self.default_zone.as_deref().filter(|z| !z.is_empty())
    }
}

/// Every account read from the configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationSet {
    /// Name of the account used when `--account` is not given
    #[serde(
        default,
        rename = "defaultAccount",
        alias = "DefaultAccount",
        alias = "defaultaccount",
        alias = "default_account"
    )]
    pub default_account: String,

    #[serde(default, alias = "Accounts")]
    pub accounts: Vec<AccountProfile>,
}

impl ConfigurationSet {
    /// Load and validate a configuration file
    ///
    /// The format follows the file extension (TOML, YAML or JSON).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .map_err(|e| ConfigError::read(path, e))?;

        let set: Self = settings
            .try_deserialize()
            .map_err(|e| ConfigError::read(path, e))?;

        set.validate(path)?;
        Ok(set)
    }

    /// Reject empty and duplicate profile names
    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for account in &self.accounts {
            if account.name.is_empty() {
                return Err(ConfigError::Invalid {
                    path: path.to_path_buf(),
                    reason: "account with an empty name".to_string(),
                });
            }
            if !seen.insert(account.name.as_str()) {
                return Err(ConfigError::Invalid {
                    path: path.to_path_buf(),
                    reason: format!("duplicate account name {:?}", account.name),
                });
            }
        }
        Ok(())
    }

    /// Index of the profile called `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.accounts.iter().position(|a| a.name == name)
    }
}
