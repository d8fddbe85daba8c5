// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! SSH key pair commands

use anyhow::Result;
use clap::{Args, Subcommand};
use exoscale_client::{ApiClientExt, Operation};

use super::{confirm, run_tasks};
use crate::context::AppContext;
use crate::output::table::{create_table, print_table};
use crate::output::{OutputFormat, print_json};
use crate::tasks::Task;

#[derive(Subcommand, Clone)]
pub enum SshkeyCommand {
    /// List SSH key pairs
    #[command(alias = "ls")]
    List,
    /// Delete SSH key pair(s)
    #[command(alias = "rm", alias = "del")]
    Delete(SshkeyDeleteArgs),
}

#[derive(Args, Clone)]
pub struct SshkeyDeleteArgs {
    /// Key pair name(s)
    #[arg(required = true)]
    pub keys: Vec<String>,
    /// Skip confirmation
    #[arg(long, short)]
    pub force: bool,
}

impl SshkeyCommand {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        match self {
            Self::List => list_keys(ctx).await,
            Self::Delete(args) => delete_keys(args, ctx).await,
        }
    }
}

async fn list_keys(ctx: &AppContext) -> Result<()> {
    let keys = ctx.client()?.ssh_key_pairs().await?;

    if ctx.output == OutputFormat::Json {
        return print_json(&keys);
    }

    let mut tbl = create_table(&["NAME", "FINGERPRINT"]);
    for key in &keys {
        tbl.add_row(vec![key.name.clone(), key.fingerprint.clone()]);
    }
    print_table(tbl, "No SSH keys found");
    Ok(())
}

// Key pairs are addressed by name only; the API reports unknown names.
async fn delete_keys(args: SshkeyDeleteArgs, ctx: &AppContext) -> Result<()> {
    let mut tasks = Vec::with_capacity(args.keys.len());
    for name in args.keys {
        if !args.force && !confirm(&format!("sure you want to delete {:?} SSH key", name))? {
            continue;
        }
        tasks.push(Task::new(
            Operation::DeleteSshKeyPair { name: name.clone() },
            format!("deleting SSH key {:?}", name),
        ));
    }

    run_tasks(ctx, tasks).await
}
