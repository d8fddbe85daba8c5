// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Instance pool commands

use anyhow::Result;
use clap::{Args, Subcommand};
use exoscale_client::{ApiClientExt, Operation};

use super::{confirm, lookup, run_tasks};
use crate::context::AppContext;
use crate::output::table::{create_table, print_table};
use crate::output::{OutputFormat, print_json};
use crate::tasks::Task;

#[derive(Subcommand, Clone)]
pub enum InstancePoolCommand {
    /// List instance pools of a zone
    #[command(alias = "ls")]
    List(PoolListArgs),
    /// Delete instance pool(s)
    #[command(alias = "rm", alias = "del")]
    Delete(PoolDeleteArgs),
}

#[derive(Args, Clone)]
pub struct PoolListArgs {
    /// Zone name or id
    #[arg(short, long)]
    pub zone: String,
}

#[derive(Args, Clone)]
pub struct PoolDeleteArgs {
    /// Instance pool name(s) or id(s)
    #[arg(required = true)]
    pub pools: Vec<String>,
    /// Zone name or id
    #[arg(short, long)]
    pub zone: String,
    /// Skip confirmation
    #[arg(long, short)]
    pub force: bool,
}

impl InstancePoolCommand {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        match self {
            Self::List(args) => list_pools(args, ctx).await,
            Self::Delete(args) => delete_pools(args, ctx).await,
        }
    }
}

async fn list_pools(args: PoolListArgs, ctx: &AppContext) -> Result<()> {
    let client = ctx.client()?;
    let zone = lookup::zone(client.as_ref(), &args.zone).await?;
    let pools = client.instance_pools(zone.id).await?;

    if ctx.output == OutputFormat::Json {
        return print_json(&pools);
    }

    let mut tbl = create_table(&["NAME", "SIZE", "STATE", "ZONE", "ID"]);
    for pool in &pools {
        tbl.add_row(vec![
            pool.name.clone(),
            pool.size.to_string(),
            pool.state.clone(),
            zone.name.clone(),
            pool.id.to_string(),
        ]);
    }
    print_table(tbl, "No instance pools found");
    Ok(())
}

async fn delete_pools(args: PoolDeleteArgs, ctx: &AppContext) -> Result<()> {
    let client = ctx.client()?;
    let zone = lookup::zone(client.as_ref(), &args.zone).await?;
    let pools = lookup::instance_pools(client.as_ref(), &zone, &args.pools).await?;

    let mut tasks = Vec::with_capacity(pools.len());
    for pool in &pools {
        if !args.force && !confirm(&format!("sure you want to delete {:?} instance pool", pool.name))? {
            continue;
        }
        tasks.push(Task::new(
            Operation::DestroyInstancePool {
                id: pool.id,
                zone_id: zone.id,
            },
            format!("deleting instance pool {:?}", pool.name),
        ));
    }

    run_tasks(ctx, tasks).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubClient, pool, zone};
    use std::sync::Arc;
    use uuid::Uuid;

    fn stub() -> Arc<StubClient> {
        let gva = zone(100, "ch-gva-2");
        let fra = zone(200, "de-fra-1");
        Arc::new(StubClient {
            pools: vec![
                pool(1, "workers", &gva),
                pool(2, "batch", &gva),
                pool(3, "workers", &fra),
            ],
            zones: vec![gva, fra],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_delete_is_scoped_to_zone() {
        let client = stub();
        let ctx = client.context();

        InstancePoolCommand::Delete(PoolDeleteArgs {
            pools: vec!["workers".to_string(), "batch".to_string()],
            zone: "ch-gva-2".to_string(),
            force: true,
        })
        .run(&ctx)
        .await
        .unwrap();

        let mut ids: Vec<(Uuid, Uuid)> = client
            .submitted()
            .into_iter()
            .filter_map(|op| match op {
                Operation::DestroyInstancePool { id, zone_id } => Some((id, zone_id)),
                _ => None,
            })
            .collect();
        ids.sort();
        assert_eq!(
            ids,
            vec![
                (Uuid::from_u128(1), Uuid::from_u128(100)),
                (Uuid::from_u128(2), Uuid::from_u128(100)),
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_zone_fails() {
        let client = stub();
        let ctx = client.context();

        let err = InstancePoolCommand::List(PoolListArgs {
            zone: "at-vie-1".to_string(),
        })
        .run(&ctx)
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "zone not found: \"at-vie-1\"");
    }

    #[tokio::test]
    async fn test_pool_from_other_zone_is_not_found() {
        let client = stub();
        let ctx = client.context();

        let err = InstancePoolCommand::Delete(PoolDeleteArgs {
            pools: vec![Uuid::from_u128(3).to_string()],
            zone: "ch-gva-2".to_string(),
            force: true,
        })
        .run(&ctx)
        .await
        .unwrap_err();

        assert!(err.to_string().contains("instance pool not found"));
        assert!(client.submitted().is_empty());
    }
}
