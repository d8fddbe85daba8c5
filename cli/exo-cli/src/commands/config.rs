// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Configuration display command

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::config::{AccountProfile, Session, paths};
use crate::context::AppContext;
use crate::output::table::{create_table, print_table};
use crate::output::{OutputFormat, print_json};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigView<'a> {
    source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_account: Option<&'a str>,
    accounts: &'a [AccountProfile],
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> ConfigView<'a> {
    fn new(session: &'a Session) -> Self {
        match session {
            Session::Environment(_) => Self {
                source: "environment",
                path: None,
                default_account: None,
                accounts: &[],
                error: None,
            },
            Session::Configured { path, config, .. } => Self {
                source: "file",
                path: Some(path),
                default_account: Some(&config.default_account),
                accounts: &config.accounts,
                error: None,
            },
            Session::Unconfigured { reason } => Self {
                source: "none",
                path: None,
                default_account: None,
                accounts: &[],
                error: reason.as_ref().map(ToString::to_string),
            },
        }
    }
}

pub fn show(ctx: &AppContext) -> Result<()> {
    let session = ctx.session();

    if ctx.output == OutputFormat::Json {
        return print_json(&ConfigView::new(session));
    }

    match session {
        Session::Environment(credentials) => {
            println!("Using credentials from the environment");
            println!("Endpoint: {}", credentials.endpoint);
        }
        Session::Configured {
            path,
            config,
            active,
        } => {
            println!("Configuration: {}", path.display());
            let mut tbl = create_table(&["NAME", "CURRENT", "ACCOUNT", "ENDPOINT", "DEFAULT ZONE"]);
            for (index, profile) in config.accounts.iter().enumerate() {
                tbl.add_row(vec![
                    profile.name.clone(),
                    if index == *active { "*" } else { "" }.to_string(),
                    profile.account.clone(),
                    profile.endpoint.clone(),
                    profile.default_zone().unwrap_or("-").to_string(),
                ]);
            }
            print_table(tbl, "No accounts configured");
        }
        Session::Unconfigured { reason } => {
            if let Some(reason) = reason {
                println!("No usable configuration: {}", reason);
            }
            println!("Configuration is read from {}.{{toml,yaml,yml,json}} in:", paths::CONFIG_BASENAME);
            for dir in paths::candidate_dirs() {
                println!("  {}", dir.display());
            }
            println!("or from EXOSCALE_ENDPOINT, EXOSCALE_KEY and EXOSCALE_SECRET.");
        }
    }

    Ok(())
}
