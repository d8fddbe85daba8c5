// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Exoscale compute API client
//!
//! The CLI talks to the API through the [`ApiClient`] trait: submit one
//! [`Operation`] and get its [`Outcome`], or list resources of one kind.
//! Asynchronous server-side jobs are polled inside `submit`, so callers
//! only ever see the final result.
//!
//! ## Usage
//!
//! ```ignore
//! use exoscale_client::{ApiClient, ApiClientExt, Credentials, HttpClient, Operation};
//!
//! let client = HttpClient::new(Credentials::new(
//!     "https://api.exoscale.com/compute",
//!     "EXOxxxxxxxx",
//!     "secret",
//! ))?;
//!
//! for vm in client.virtual_machines().await? {
//!     println!("{} {}", vm.name, vm.state);
//! }
//!
//! client.submit(&Operation::DeleteSshKeyPair { name: "old".into() }).await?;
//! ```

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

pub mod auth;
mod error;
mod http;
mod operation;
pub mod types;

pub use error::ClientError;
pub use http::HttpClient;
pub use operation::{ListRequest, Operation};
pub use types::{InstancePool, Resource, SshKeyPair, VirtualMachine, Zone};

/// Endpoint and API key pair for one account
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub endpoint: String,
    pub key: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(
        endpoint: impl Into<String>,
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            key: key.into(),
            secret: secret.into(),
        }
    }
}

// Keep the secret out of debug logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Successful result of a submitted operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    /// Command that produced this outcome
    pub command: String,
    /// Response body (or job result for asynchronous commands)
    pub body: serde_json::Value,
}

/// The API surface used by the CLI
///
/// Implementations must be safe to share between concurrently running
/// tasks.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Submit a mutating operation, waiting for its job if it has one
    async fn submit(&self, operation: &Operation) -> Result<Outcome, ClientError>;

    /// List resources
    async fn list(&self, request: &ListRequest) -> Result<Vec<Resource>, ClientError>;
}

/// Typed list helpers on top of [`ApiClient::list`]
#[async_trait]
pub trait ApiClientExt: ApiClient {
    async fn zones(&self, name: Option<&str>) -> Result<Vec<Zone>, ClientError> {
        let request = ListRequest::Zones {
            name: name.map(str::to_string),
        };
        Ok(self
            .list(&request)
            .await?
            .into_iter()
            .filter_map(|r| match r {
                Resource::Zone(z) => Some(z),
                _ => None,
            })
            .collect())
    }

    async fn virtual_machines(&self) -> Result<Vec<VirtualMachine>, ClientError> {
        Ok(self
            .list(&ListRequest::VirtualMachines)
            .await?
            .into_iter()
            .filter_map(|r| match r {
                Resource::VirtualMachine(vm) => Some(vm),
                _ => None,
            })
            .collect())
    }

    async fn ssh_key_pairs(&self) -> Result<Vec<SshKeyPair>, ClientError> {
        Ok(self
            .list(&ListRequest::SshKeyPairs)
            .await?
            .into_iter()
            .filter_map(|r| match r {
                Resource::SshKeyPair(k) => Some(k),
                _ => None,
            })
            .collect())
    }

    async fn instance_pools(&self, zone_id: Uuid) -> Result<Vec<InstancePool>, ClientError> {
        Ok(self
            .list(&ListRequest::InstancePools { zone_id })
            .await?
            .into_iter()
            .filter_map(|r| match r {
                Resource::InstancePool(p) => Some(p),
                _ => None,
            })
            .collect())
    }
}

impl<T: ApiClient + ?Sized> ApiClientExt for T {}
