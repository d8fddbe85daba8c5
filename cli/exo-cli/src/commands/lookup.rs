// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Name-or-id resolution of resources
//!
//! A UUID-shaped argument matches ids, anything else matches names.

use anyhow::{Result, anyhow};
use exoscale_client::{ApiClient, ApiClientExt, ClientError, InstancePool, VirtualMachine, Zone};
use uuid::Uuid;

/// Pick the single item whose id or name matches `wanted`
pub fn find_one<'a, T>(
    items: &'a [T],
    wanted: &str,
    kind: &'static str,
    id_of: impl Fn(&T) -> Uuid,
    name_of: impl Fn(&T) -> &str,
) -> Result<&'a T> {
    if let Ok(id) = Uuid::parse_str(wanted) {
        return items
            .iter()
            .find(|item| id_of(item) == id)
            .ok_or_else(|| not_found(kind, wanted));
    }

    let mut matches = items.iter().filter(|item| name_of(item) == wanted);
    match (matches.next(), matches.next()) {
        (Some(item), None) => Ok(item),
        (None, _) => Err(not_found(kind, wanted)),
        (Some(_), Some(_)) => Err(anyhow!(
            "more than one {} is named {:?}, use its id instead",
            kind,
            wanted
        )),
    }
}

fn not_found(kind: &'static str, name: &str) -> anyhow::Error {
    ClientError::NotFound {
        kind,
        name: name.to_string(),
    }
    .into()
}

/// Resolve a zone by name or id
pub async fn zone(client: &dyn ApiClient, wanted: &str) -> Result<Zone> {
    let filter = match Uuid::parse_str(wanted) {
        Ok(_) => None,
        Err(_) => Some(wanted),
    };
    let zones = client.zones(filter).await?;
    find_one(&zones, wanted, "zone", |z| z.id, |z| z.name.as_str()).cloned()
}

/// Resolve several virtual machines with a single list call
pub async fn virtual_machines(
    client: &dyn ApiClient,
    wanted: &[String],
) -> Result<Vec<VirtualMachine>> {
    let vms = client.virtual_machines().await?;
    wanted
        .iter()
        .map(|w| find_one(&vms, w, "virtual machine", |vm| vm.id, |vm| vm.name.as_str()).cloned())
        .collect()
}

/// Resolve several instance pools of one zone
pub async fn instance_pools(
    client: &dyn ApiClient,
    zone: &Zone,
    wanted: &[String],
) -> Result<Vec<InstancePool>> {
    let pools = client.instance_pools(zone.id).await?;
    wanted
        .iter()
        .map(|w| find_one(&pools, w, "instance pool", |p| p.id, |p| p.name.as_str()).cloned())
        .collect()
}

/// The virtual machine backing a standalone Kubernetes cluster
pub async fn kube_instance(client: &dyn ApiClient, cluster: &str) -> Result<VirtualMachine> {
    let vms: Vec<VirtualMachine> = client
        .virtual_machines()
        .await?
        .into_iter()
        .filter(VirtualMachine::is_kube_instance)
        .collect();
    find_one(&vms, cluster, "Kubernetes cluster instance", |vm| vm.id, |vm| {
        vm.name.as_str()
    })
    .cloned()
}
