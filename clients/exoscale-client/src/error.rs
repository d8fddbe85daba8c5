// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for exoscale-client

use thiserror::Error;

/// Errors that can occur while talking to the compute API
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure (connection refused, TLS, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the request
    #[error("API error {code} on {command}: {text}")]
    Api {
        command: String,
        code: u16,
        text: String,
    },

    /// An asynchronous job finished in the failed state
    #[error("job {job_id} failed: {text}")]
    JobFailed { job_id: String, text: String },

    /// The response did not have the expected shape
    #[error("unexpected response to {command}: {reason}")]
    UnexpectedResponse { command: String, reason: String },

    /// The configured endpoint is not a usable URL
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The request could not be signed
    #[error("signing error: {0}")]
    Signing(String),

    /// A resource payload could not be decoded
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A lookup by name or id matched nothing
    #[error("{kind} not found: {name:?}")]
    NotFound { kind: &'static str, name: String },
}
