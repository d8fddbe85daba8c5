// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Virtual machine commands

use anyhow::Result;
use clap::{Args, Subcommand};
use exoscale_client::{ApiClientExt, Operation, VirtualMachine};

use super::{confirm, lookup, run_tasks};
use crate::context::AppContext;
use crate::output::table::{create_table, print_table};
use crate::output::{OutputFormat, print_json};
use crate::tasks::Task;

#[derive(Subcommand, Clone)]
pub enum VmCommand {
    /// List virtual machines
    #[command(alias = "ls")]
    List,
    /// Start virtual machine(s)
    Start(VmArgs),
    /// Stop virtual machine(s)
    Stop(VmArgs),
    /// Reboot virtual machine(s)
    Reboot(VmArgs),
    /// Delete virtual machine(s)
    #[command(alias = "rm", alias = "del")]
    Delete(VmDeleteArgs),
}

#[derive(Args, Clone)]
pub struct VmArgs {
    /// Virtual machine name(s) or id(s)
    #[arg(required = true)]
    pub vms: Vec<String>,
}

#[derive(Args, Clone)]
pub struct VmDeleteArgs {
    /// Virtual machine name(s) or id(s)
    #[arg(required = true)]
    pub vms: Vec<String>,
    /// Skip confirmation
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Clone, Copy)]
enum Action {
    Start,
    Stop,
    Reboot,
    Delete,
}

impl Action {
    fn operation(self, vm: &VirtualMachine) -> Operation {
        let id = vm.id;
        match self {
            Self::Start => Operation::StartVirtualMachine { id },
            Self::Stop => Operation::StopVirtualMachine { id },
            Self::Reboot => Operation::RebootVirtualMachine { id },
            Self::Delete => Operation::DestroyVirtualMachine { id },
        }
    }

    fn verb(self) -> &'static str {
        match self {
            Self::Start => "starting",
            Self::Stop => "stopping",
            Self::Reboot => "rebooting",
            Self::Delete => "deleting",
        }
    }

    fn task(self, vm: &VirtualMachine) -> Task {
        Task::new(
            self.operation(vm),
            format!("{} {:?}", self.verb(), vm.name),
        )
    }
}

impl VmCommand {
    pub async fn run(self, ctx: &AppContext) -> Result<()> {
        match self {
            Self::List => list_vms(ctx).await,
            Self::Start(args) => act(ctx, &args.vms, Action::Start, true).await,
            Self::Stop(args) => act(ctx, &args.vms, Action::Stop, true).await,
            Self::Reboot(args) => act(ctx, &args.vms, Action::Reboot, true).await,
            Self::Delete(args) => act(ctx, &args.vms, Action::Delete, args.force).await,
        }
    }
}

async fn list_vms(ctx: &AppContext) -> Result<()> {
    let vms = ctx.client()?.virtual_machines().await?;

    if ctx.output == OutputFormat::Json {
        return print_json(&vms);
    }

    let mut tbl = create_table(&["NAME", "SECURITY GROUP", "IP ADDRESS", "STATE", "ZONE", "ID"]);
    for vm in &vms {
        let groups: Vec<&str> = vm.securitygroup.iter().map(|g| g.name.as_str()).collect();
        tbl.add_row(vec![
            vm.name.clone(),
            groups.join(", "),
            vm.ip_address().unwrap_or("-").to_string(),
            vm.state.clone(),
            vm.zonename.clone(),
            vm.id.to_string(),
        ]);
    }
    print_table(tbl, "No virtual machines found");
    Ok(())
}

async fn act(ctx: &AppContext, wanted: &[String], action: Action, force: bool) -> Result<()> {
    let client = ctx.client()?;
    let vms = lookup::virtual_machines(client.as_ref(), wanted).await?;

    let mut tasks = Vec::with_capacity(vms.len());
    for vm in &vms {
        if !force && !confirm(&format!("sure you want to delete {:?} virtual machine", vm.name))? {
            continue;
        }
        tasks.push(action.task(vm));
    }

    run_tasks(ctx, tasks).await
}
