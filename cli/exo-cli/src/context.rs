// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Per-invocation application context
//!
//! Built once in `main` and handed to every command handler.

use std::sync::{Arc, OnceLock};

use anyhow::Result;
use exoscale_client::{ApiClient, HttpClient};
use tracing::debug;

use crate::config::Session;
use crate::output::OutputFormat;
use crate::tasks::BatchOptions;

pub struct AppContext {
    session: Session,
    pub output: OutputFormat,
    pub batch: BatchOptions,
    client: OnceLock<Arc<dyn ApiClient>>,
}

impl AppContext {
    pub fn new(session: Session, output: OutputFormat, batch: BatchOptions) -> Self {
        Self {
            session,
            output,
            batch,
            client: OnceLock::new(),
        }
    }

    /// Context whose client is already built
    #[cfg(test)]
    pub fn with_client(session: Session, client: Arc<dyn ApiClient>) -> Self {
        let ctx = Self::new(session, OutputFormat::Json, BatchOptions::default());
        let _ = ctx.client.set(client);
        ctx
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// API client for the active account, built on first use
    ///
    /// Fails when no account was resolved; only account-free commands run
    /// in that mode, so reaching this is a bug in command classification.
    pub fn client(&self) -> Result<Arc<dyn ApiClient>> {
        if let Some(client) = self.client.get() {
            return Ok(Arc::clone(client));
        }

        let credentials = self.session.credentials().ok_or_else(|| {
            anyhow::anyhow!("no account configured; create ~/.exoscale/exoscale.toml or set EXOSCALE_ENDPOINT, EXOSCALE_KEY and EXOSCALE_SECRET")
        })?;

        debug!(endpoint = %credentials.endpoint, "building API client");
        let client: Arc<dyn ApiClient> = Arc::new(HttpClient::new(credentials)?);
        Ok(Arc::clone(self.client.get_or_init(|| client)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvOverrides;
    use exoscale_client::Credentials;

    #[test]
    fn test_client_is_memoized() {
        let env = EnvOverrides {
            endpoint: Some("https://api.example.com/compute".to_string()),
            key: Some("EXOkey".to_string()),
            secret: Some("secret".to_string()),
        };
        let session = Session::Environment(env.credentials().unwrap());
        let ctx = AppContext::new(session, OutputFormat::Table, BatchOptions::default());

        let first = ctx.client().unwrap();
        let second = ctx.client().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_unconfigured_has_no_client() {
        let ctx = AppContext::new(
            Session::Unconfigured { reason: None },
            OutputFormat::Table,
            BatchOptions::default(),
        );
        let err = ctx.client().err().unwrap();
        assert!(err.to_string().contains("no account configured"));
    }

    #[test]
    fn test_bad_endpoint_is_reported() {
        let session = Session::Environment(Credentials::new("nope", "k", "s"));
        let ctx = AppContext::new(session, OutputFormat::Table, BatchOptions::default());
        assert!(ctx.client().is_err());
    }
}
