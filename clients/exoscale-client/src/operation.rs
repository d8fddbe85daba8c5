// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Mutating operations and list requests

use std::fmt;

use uuid::Uuid;

/// A mutating request understood by [`crate::ApiClient::submit`]
///
/// Each variant carries the identifier of the resource it acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    DestroyInstancePool { id: Uuid, zone_id: Uuid },
    DeleteSshKeyPair { name: String },
    StartVirtualMachine { id: Uuid },
    StopVirtualMachine { id: Uuid },
    RebootVirtualMachine { id: Uuid },
    DestroyVirtualMachine { id: Uuid },
}

impl Operation {
    /// API command name
    pub fn command(&self) -> &'static str {
        match self {
            Self::DestroyInstancePool { .. } => "destroyInstancePool",
            Self::DeleteSshKeyPair { .. } => "deleteSSHKeyPair",
            Self::StartVirtualMachine { .. } => "startVirtualMachine",
            Self::StopVirtualMachine { .. } => "stopVirtualMachine",
            Self::RebootVirtualMachine { .. } => "rebootVirtualMachine",
            Self::DestroyVirtualMachine { .. } => "destroyVirtualMachine",
        }
    }

    /// Whether the server answers with a job id that has to be polled
    pub fn is_async(&self) -> bool {
        matches!(
            self,
            Self::StartVirtualMachine { .. }
                | Self::StopVirtualMachine { .. }
                | Self::RebootVirtualMachine { .. }
                | Self::DestroyVirtualMachine { .. }
        )
    }

    /// Command-specific query parameters
    pub fn params(&self) -> Vec<(String, String)> {
        match self {
            Self::DestroyInstancePool { id, zone_id } => vec![
                ("id".to_string(), id.to_string()),
                ("zoneid".to_string(), zone_id.to_string()),
            ],
            Self::DeleteSshKeyPair { name } => vec![("name".to_string(), name.clone())],
            Self::StartVirtualMachine { id }
            | Self::StopVirtualMachine { id }
            | Self::RebootVirtualMachine { id }
            | Self::DestroyVirtualMachine { id } => vec![("id".to_string(), id.to_string())],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteSshKeyPair { name } => write!(f, "{} {}", self.command(), name),
            Self::DestroyInstancePool { id, .. }
            | Self::StartVirtualMachine { id }
            | Self::StopVirtualMachine { id }
            | Self::RebootVirtualMachine { id }
            | Self::DestroyVirtualMachine { id } => write!(f, "{} {}", self.command(), id),
        }
    }
}

/// A read request understood by [`crate::ApiClient::list`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRequest {
    Zones { name: Option<String> },
    VirtualMachines,
    SshKeyPairs,
    InstancePools { zone_id: Uuid },
}

impl ListRequest {
    pub fn command(&self) -> &'static str {
        match self {
            Self::Zones { .. } => "listZones",
            Self::VirtualMachines => "listVirtualMachines",
            Self::SshKeyPairs => "listSSHKeyPairs",
            Self::InstancePools { .. } => "listInstancePools",
        }
    }

    /// Key under which the response lists its items
    pub fn item_key(&self) -> &'static str {
        match self {
            Self::Zones { .. } => "zone",
            Self::VirtualMachines => "virtualmachine",
            Self::SshKeyPairs => "sshkeypair",
            Self::InstancePools { .. } => "instancepool",
        }
    }

    pub fn params(&self) -> Vec<(String, String)> {
        match self {
            Self::Zones { name: Some(name) } => vec![("name".to_string(), name.clone())],
            Self::InstancePools { zone_id } => vec![("zoneid".to_string(), zone_id.to_string())],
            Self::Zones { name: None } | Self::VirtualMachines | Self::SshKeyPairs => vec![],
        }
    }
}
