// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Resource types returned by list calls

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag carried by the virtual machine of a standalone Kubernetes cluster
pub const KUBE_TAG_KEY: &str = "managedby";
pub const KUBE_TAG_VALUE: &str = "exokube";

/// A zone (datacenter)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Zone {
    pub id: Uuid,
    pub name: String,
}

/// A resource tag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceTag {
    pub key: String,
    pub value: String,
}

/// A network interface of a virtual machine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Nic {
    #[serde(default)]
    pub ipaddress: Option<String>,
    #[serde(default)]
    pub isdefault: bool,
}

/// A security group reference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecurityGroupRef {
    pub name: String,
}

/// A virtual machine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VirtualMachine {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zonename: String,
    #[serde(default)]
    pub nic: Vec<Nic>,
    #[serde(default)]
    pub tags: Vec<ResourceTag>,
    #[serde(default)]
    pub securitygroup: Vec<SecurityGroupRef>,
}

impl VirtualMachine {
    /// Address of the default NIC, if any
    pub fn ip_address(&self) -> Option<&str> {
        self.nic
            .iter()
            .find(|n| n.isdefault)
            .or_else(|| self.nic.first())
            .and_then(|n| n.ipaddress.as_deref())
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }

    /// Whether this machine backs a standalone Kubernetes cluster
    pub fn is_kube_instance(&self) -> bool {
        self.tag(KUBE_TAG_KEY) == Some(KUBE_TAG_VALUE)
    }
}

/// An SSH key pair registered with the account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SshKeyPair {
    pub name: String,
    #[serde(default)]
    pub fingerprint: String,
}

/// An instance pool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstancePool {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub zoneid: Option<Uuid>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub size: u32,
}

/// A resource returned by [`crate::ApiClient::list`]
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Zone(Zone),
    VirtualMachine(VirtualMachine),
    SshKeyPair(SshKeyPair),
    InstancePool(InstancePool),
}
