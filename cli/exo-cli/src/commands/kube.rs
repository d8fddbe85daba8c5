// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Standalone Kubernetes cluster instance commands
//!
//! A cluster runs on a single virtual machine tagged `managedby=exokube`
//! and named after the cluster.

use anyhow::Result;
use clap::{Args, Subcommand};
use exoscale_client::Operation;

use super::{confirm, lookup, run_tasks};
use crate::context::AppContext;
use crate::tasks::Task;

#[derive(Subcommand, Clone)]
pub enum KubeCommand {
    /// Start a cluster instance
    Start(KubeArgs),
    /// Stop a cluster instance
    Stop(KubeArgs),
}

#[derive(Args, Clone)]
pub struct KubeArgs {
    /// Cluster name
    pub cluster: String,
    /// Skip confirmation
    #[arg(long, short)]
    pub force: bool,
}

impl KubeCommand {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        let (args, verb, progressive) = match &self {
            Self::Start(args) => (args, "start", "starting"),
            Self::Stop(args) => (args, "stop", "stopping"),
        };

        let client = ctx.client()?;
        let vm = lookup::kube_instance(client.as_ref(), &args.cluster).await?;

        if !args.force
            && !confirm(&format!("do you really want to {} cluster {:?}", verb, args.cluster))?
        {
            return Ok(());
        }

        let operation = match &self {
            Self::Start(_) => Operation::StartVirtualMachine { id: vm.id },
            Self::Stop(_) => Operation::StopVirtualMachine { id: vm.id },
        };
        let task = Task::new(operation, format!("{} cluster {:?}", progressive, args.cluster));
        run_tasks(ctx, vec![task]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubClient, kube_vm, vm};
    use std::sync::Arc;
    use uuid::Uuid;

    fn stub() -> Arc<StubClient> {
        Arc::new(StubClient {
            vms: vec![vm(1, "demo"), kube_vm(2, "demo"), kube_vm(3, "other")],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_start_targets_tagged_instance() {
        let client = stub();
        let ctx = client.context();

        KubeCommand::Start(KubeArgs {
            cluster: "demo".to_string(),
            force: true,
        })
        .run(&ctx)
        .await
        .unwrap();

        assert_eq!(
            client.submitted(),
            vec![Operation::StartVirtualMachine {
                id: Uuid::from_u128(2)
            }]
        );
    }

    #[tokio::test]
    async fn test_untagged_vm_is_not_a_cluster() {
        let client = Arc::new(StubClient {
            vms: vec![vm(1, "plain")],
            ..Default::default()
        });
        let ctx = client.context();

        let err = KubeCommand::Stop(KubeArgs {
            cluster: "plain".to_string(),
            force: true,
        })
        .run(&ctx)
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Kubernetes cluster instance not found"));
    }
}
