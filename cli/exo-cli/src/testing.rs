// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! In-memory API client for command tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use exoscale_client::types::{ResourceTag, KUBE_TAG_KEY, KUBE_TAG_VALUE};
use exoscale_client::{
    ApiClient, ClientError, InstancePool, ListRequest, Operation, Outcome, Resource, SshKeyPair,
    VirtualMachine, Zone,
};
use uuid::Uuid;

use crate::config::Session;
use crate::context::AppContext;

/// Serves fixed inventories and records every submitted operation
#[derive(Default)]
pub struct StubClient {
    pub zones: Vec<Zone>,
    pub vms: Vec<VirtualMachine>,
    pub keys: Vec<SshKeyPair>,
    pub pools: Vec<InstancePool>,
    pub submitted: Mutex<Vec<Operation>>,
}

impl StubClient {
    pub fn submitted(&self) -> Vec<Operation> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn context(self: &Arc<Self>) -> AppContext {
        AppContext::with_client(Session::Unconfigured { reason: None }, Arc::clone(self) as Arc<dyn ApiClient>)
    }
}

#[async_trait]
impl ApiClient for StubClient {
    async fn submit(&self, operation: &Operation) -> Result<Outcome, ClientError> {
        self.submitted.lock().unwrap().push(operation.clone());
        Ok(Outcome {
            command: operation.command().to_string(),
            body: serde_json::json!({"success": true}),
        })
    }

    async fn list(&self, request: &ListRequest) -> Result<Vec<Resource>, ClientError> {
        Ok(match request {
            ListRequest::Zones { name } => self
                .zones
                .iter()
                .filter(|z| name.as_deref().is_none_or(|n| z.name == n))
                .cloned()
                .map(Resource::Zone)
                .collect(),
            ListRequest::VirtualMachines => {
                self.vms.iter().cloned().map(Resource::VirtualMachine).collect()
            }
            ListRequest::SshKeyPairs => self.keys.iter().cloned().map(Resource::SshKeyPair).collect(),
            ListRequest::InstancePools { zone_id } => self
                .pools
                .iter()
                .filter(|p| p.zoneid == Some(*zone_id))
                .cloned()
                .map(Resource::InstancePool)
                .collect(),
        })
    }
}

pub fn zone(n: u128, name: &str) -> Zone {
    Zone {
        id: Uuid::from_u128(n),
        name: name.to_string(),
    }
}

pub fn vm(n: u128, name: &str) -> VirtualMachine {
    VirtualMachine {
        id: Uuid::from_u128(n),
        name: name.to_string(),
        state: "Running".to_string(),
        zonename: "ch-gva-2".to_string(),
        nic: vec![],
        tags: vec![],
        securitygroup: vec![],
    }
}

pub fn kube_vm(n: u128, name: &str) -> VirtualMachine {
    let mut vm = vm(n, name);
    vm.tags.push(ResourceTag {
        key: KUBE_TAG_KEY.to_string(),
        value: KUBE_TAG_VALUE.to_string(),
    });
    vm
}

pub fn pool(n: u128, name: &str, zone: &Zone) -> InstancePool {
    InstancePool {
        id: Uuid::from_u128(n),
        name: name.to_string(),
        zoneid: Some(zone.id),
        state: "running".to_string(),
        size: 2,
    }
}
