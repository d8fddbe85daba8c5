// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! reqwest-backed [`ApiClient`]

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::auth;
use crate::types::{InstancePool, SshKeyPair, VirtualMachine, Zone};
use crate::{ApiClient, ClientError, Credentials, ListRequest, Operation, Outcome, Resource};

/// Interval between two `queryAsyncJobResult` calls
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// How long a signed request stays valid
const SIGNATURE_LIFETIME_MINUTES: i64 = 10;

const JOB_PENDING: u64 = 0;
const JOB_SUCCEEDED: u64 = 1;

/// HTTP client for the compute API
pub struct HttpClient {
    endpoint: Url,
    credentials: Credentials,
    http: reqwest::Client,
    poll_interval: Duration,
}

impl HttpClient {
    /// Create a client bound to one account's endpoint and keys
    pub fn new(credentials: Credentials) -> Result<Self, ClientError> {
        let endpoint =
            Url::parse(&credentials.endpoint).map_err(|e| ClientError::InvalidEndpoint {
                endpoint: credentials.endpoint.clone(),
                reason: e.to_string(),
            })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ClientError::InvalidEndpoint {
                endpoint: credentials.endpoint.clone(),
                reason: format!("unsupported scheme {:?}", endpoint.scheme()),
            });
        }

        // reqwest is built without a bundled crypto provider. Another
        // component may already have installed one, which is fine.
        if rustls::crypto::CryptoProvider::get_default().is_none() {
            let _ = rustls::crypto::ring::default_provider().install_default();
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("exo/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            endpoint,
            credentials,
            http,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Override the job polling interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sign and send one command, returning the unwrapped response object
    async fn request(
        &self,
        command: &str,
        mut params: Vec<(String, String)>,
    ) -> Result<Value, ClientError> {
        let expires = chrono::Utc::now() + chrono::Duration::minutes(SIGNATURE_LIFETIME_MINUTES);

        params.push(("command".to_string(), command.to_string()));
        params.push(("response".to_string(), "json".to_string()));
        params.push(("apikey".to_string(), self.credentials.key.clone()));
        params.push(("signatureversion".to_string(), "3".to_string()));
        params.push((
            "expires".to_string(),
            expires.format("%Y-%m-%dT%H:%M:%S+0000").to_string(),
        ));

        let signature = auth::sign(&self.credentials.secret, &params)?;
        params.push(("signature".to_string(), signature));

        let mut url = self.endpoint.clone();
        url.set_query(Some(&auth::canonical_query(&params)));

        debug!(command, "sending request");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        // Proxies answer failures with bodies of their own; keep the status.
        let inner = match serde_json::from_slice::<Value>(&bytes) {
            Ok(body) => match unwrap_response(command, body) {
                Ok(inner) => inner,
                Err(_) if !status.is_success() => return Err(status_error(command, status)),
                Err(e) => return Err(e),
            },
            Err(_) if !status.is_success() => return Err(status_error(command, status)),
            Err(e) => return Err(e.into()),
        };

        if let Some(text) = inner.get("errortext").and_then(Value::as_str) {
            let code = inner
                .get("errorcode")
                .and_then(Value::as_u64)
                .and_then(|c| u16::try_from(c).ok())
                .unwrap_or(status.as_u16());
            return Err(ClientError::Api {
                command: command.to_string(),
                code,
                text: text.to_string(),
            });
        }

        if !status.is_success() {
            return Err(status_error(command, status));
        }

        Ok(inner)
    }

    /// Poll an asynchronous job until it leaves the pending state
    async fn wait_for_job(&self, command: &str, job_id: &str) -> Result<Value, ClientError> {
        loop {
            let result = self
                .request(
                    "queryAsyncJobResult",
                    vec![("jobid".to_string(), job_id.to_string())],
                )
                .await?;

            let status = result
                .get("jobstatus")
                .and_then(Value::as_u64)
                .ok_or_else(|| ClientError::UnexpectedResponse {
                    command: command.to_string(),
                    reason: format!("job {} has no status", job_id),
                })?;

            match status {
                JOB_PENDING => {
                    debug!(command, job_id, "job pending");
                    tokio::time::sleep(self.poll_interval).await;
                }
                JOB_SUCCEEDED => {
                    return Ok(result.get("jobresult").cloned().unwrap_or(Value::Null));
                }
                _ => {
                    let text = result
                        .get("jobresult")
                        .and_then(|r| r.get("errortext"))
                        .and_then(Value::as_str)
                        .unwrap_or("unknown error")
                        .to_string();
                    warn!(command, job_id, error = %text, "job failed");
                    return Err(ClientError::JobFailed {
                        job_id: job_id.to_string(),
                        text,
                    });
                }
            }
        }
    }
}

fn status_error(command: &str, status: reqwest::StatusCode) -> ClientError {
    ClientError::Api {
        command: command.to_string(),
        code: status.as_u16(),
        text: status.canonical_reason().unwrap_or("error").to_string(),
    }
}

/// Strip the `<command>response` envelope
fn unwrap_response(command: &str, body: Value) -> Result<Value, ClientError> {
    match body {
        Value::Object(map) if map.len() == 1 => match map.into_iter().next() {
            Some((_, inner @ Value::Object(_))) => Ok(inner),
            _ => Err(ClientError::UnexpectedResponse {
                command: command.to_string(),
                reason: "response envelope is not an object".to_string(),
            }),
        },
        _ => Err(ClientError::UnexpectedResponse {
            command: command.to_string(),
            reason: "expected a single response envelope".to_string(),
        }),
    }
}

fn decode_items(request: &ListRequest, response: &Value) -> Result<Vec<Resource>, ClientError> {
    let items = match response.get(request.item_key()) {
        Some(Value::Array(items)) => items.clone(),
        Some(_) => {
            return Err(ClientError::UnexpectedResponse {
                command: request.command().to_string(),
                reason: format!("{} is not a list", request.item_key()),
            });
        }
        // Empty lists are returned as an empty envelope.
        None => return Ok(vec![]),
    };

    items
        .into_iter()
        .map(|item| -> Result<Resource, ClientError> {
            Ok(match request {
                ListRequest::Zones { .. } => Resource::Zone(serde_json::from_value::<Zone>(item)?),
                ListRequest::VirtualMachines => {
                    Resource::VirtualMachine(serde_json::from_value::<VirtualMachine>(item)?)
                }
                ListRequest::SshKeyPairs => {
                    Resource::SshKeyPair(serde_json::from_value::<SshKeyPair>(item)?)
                }
                ListRequest::InstancePools { .. } => {
                    Resource::InstancePool(serde_json::from_value::<InstancePool>(item)?)
                }
            })
        })
        .collect()
}

#[async_trait]
impl ApiClient for HttpClient {
    async fn submit(&self, operation: &Operation) -> Result<Outcome, ClientError> {
        let command = operation.command();
        let response = self.request(command, operation.params()).await?;

        let body = if operation.is_async() {
            let job_id = response
                .get("jobid")
                .and_then(Value::as_str)
                .ok_or_else(|| ClientError::UnexpectedResponse {
                    command: command.to_string(),
                    reason: "asynchronous command returned no job id".to_string(),
                })?
                .to_string();
            self.wait_for_job(command, &job_id).await?
        } else {
            response
        };

        Ok(Outcome {
            command: command.to_string(),
            body,
        })
    }

    async fn list(&self, request: &ListRequest) -> Result<Vec<Resource>, ClientError> {
        let response = self.request(request.command(), request.params()).await?;
        decode_items(request, &response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uuid::Uuid;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VM_ID: &str = "8b7c5b8a-7f6e-4c1e-9d9b-1b7f0f4c2a11";

    fn client_for(server: &MockServer) -> HttpClient {
        HttpClient::new(Credentials::new(server.uri(), "EXOkey", "secret"))
            .unwrap()
            .with_poll_interval(Duration::from_millis(10))
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        let err = HttpClient::new(Credentials::new("not a url", "k", "s"))
            .err()
            .unwrap();
        assert!(matches!(err, ClientError::InvalidEndpoint { .. }));

        let err = HttpClient::new(Credentials::new("ftp://example.com", "k", "s"))
            .err()
            .unwrap();
        assert!(matches!(err, ClientError::InvalidEndpoint { .. }));
    }

    #[tokio::test]
    async fn test_list_virtual_machines() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("command", "listVirtualMachines"))
            .and(query_param("apikey", "EXOkey"))
            .and(query_param("response", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "listvirtualmachinesresponse": {
                    "count": 1,
                    "virtualmachine": [
                        {"id": VM_ID, "name": "web1", "state": "Running", "zonename": "ch-gva-2"}
                    ]
                }
            })))
            .mount(&server)
            .await;

        let resources = client_for(&server)
            .list(&ListRequest::VirtualMachines)
            .await
            .unwrap();

        assert_eq!(resources.len(), 1);
        match &resources[0] {
            Resource::VirtualMachine(vm) => {
                assert_eq!(vm.name, "web1");
                assert_eq!(vm.zonename, "ch-gva-2");
            }
            other => panic!("unexpected resource {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_list_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("command", "listSSHKeyPairs"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"listsshkeypairsresponse": {}})),
            )
            .mount(&server)
            .await;

        let resources = client_for(&server)
            .list(&ListRequest::SshKeyPairs)
            .await
            .unwrap();
        assert!(resources.is_empty());
    }

    #[tokio::test]
    async fn test_sync_operation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("command", "deleteSSHKeyPair"))
            .and(query_param("name", "laptop"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "deletesshkeypairresponse": {"success": true}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .submit(&Operation::DeleteSshKeyPair {
                name: "laptop".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(outcome.command, "deleteSSHKeyPair");
        assert_eq!(outcome.body, json!({"success": true}));
    }

    #[tokio::test]
    async fn test_async_operation_polls_job() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("command", "stopVirtualMachine"))
            .and(query_param("id", VM_ID))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stopvirtualmachineresponse": {"jobid": "job-1"}
            })))
            .mount(&server)
            .await;
        // First poll sees the job pending, later polls see it done.
        Mock::given(method("GET"))
            .and(query_param("command", "queryAsyncJobResult"))
            .and(query_param("jobid", "job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "queryasyncjobresultresponse": {"jobid": "job-1", "jobstatus": 0}
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("command", "queryAsyncJobResult"))
            .and(query_param("jobid", "job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "queryasyncjobresultresponse": {
                    "jobid": "job-1",
                    "jobstatus": 1,
                    "jobresult": {"virtualmachine": {"id": VM_ID, "state": "Stopped"}}
                }
            })))
            .mount(&server)
            .await;

        let id = Uuid::parse_str(VM_ID).unwrap();
        let outcome = client_for(&server)
            .submit(&Operation::StopVirtualMachine { id })
            .await
            .unwrap();

        assert_eq!(outcome.body["virtualmachine"]["state"], "Stopped");
    }

    #[tokio::test]
    async fn test_failed_job() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("command", "destroyVirtualMachine"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "destroyvirtualmachineresponse": {"jobid": "job-2"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("command", "queryAsyncJobResult"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "queryasyncjobresultresponse": {
                    "jobid": "job-2",
                    "jobstatus": 2,
                    "jobresult": {"errorcode": 530, "errortext": "machine is locked"}
                }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .submit(&Operation::DestroyVirtualMachine { id: Uuid::nil() })
            .await
            .unwrap_err();

        match err {
            ClientError::JobFailed { job_id, text } => {
                assert_eq!(job_id, "job-2");
                assert_eq!(text, "machine is locked");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("command", "destroyInstancePool"))
            .respond_with(ResponseTemplate::new(431).set_body_json(json!({
                "destroyinstancepoolresponse": {
                    "errorcode": 431,
                    "errortext": "Unable to find instance pool"
                }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .submit(&Operation::DestroyInstancePool {
                id: Uuid::nil(),
                zone_id: Uuid::nil(),
            })
            .await
            .unwrap_err();

        match err {
            ClientError::Api {
                command,
                code,
                text,
            } => {
                assert_eq!(command, "destroyInstancePool");
                assert_eq!(code, 431);
                assert_eq!(text, "Unable to find instance pool");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("command", "listSSHKeyPairs"))
            .respond_with(
                ResponseTemplate::new(502)
                    .set_body_string("<html><body>502 Bad Gateway</body></html>"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list(&ListRequest::SshKeyPairs)
            .await
            .unwrap_err();

        match err {
            ClientError::Api { command, code, text } => {
                assert_eq!(command, "listSSHKeyPairs");
                assert_eq!(code, 502);
                assert_eq!(text, "Bad Gateway");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_success_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .list(&ListRequest::SshKeyPairs)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_unwrap_response_rejects_bare_values() {
        let err = unwrap_response("listZones", json!([1, 2])).unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedResponse { .. }));
    }
}
