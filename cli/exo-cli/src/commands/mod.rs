// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! CLI commands

pub mod config;
pub mod instance_pool;
pub mod kube;
pub mod lookup;
pub mod sshkey;
pub mod vm;

pub use instance_pool::InstancePoolCommand;
pub use kube::KubeCommand;
pub use sshkey::SshkeyCommand;
pub use vm::VmCommand;

use anyhow::Result;
use dialoguer::Confirm;
use serde::Serialize;
use tracing::warn;

use crate::context::AppContext;
use crate::output::{OutputFormat, print_json};
use crate::tasks::{self, Task, TaskResult};

/// Ask a yes/no question, defaulting to no
pub fn confirm(question: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()?)
}

#[derive(Serialize)]
struct TaskReport<'a> {
    description: &'a str,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run a batch, print its outcome and return its first failure
pub async fn run_tasks(ctx: &AppContext, tasks: Vec<Task>) -> Result<()> {
    if tasks.is_empty() {
        return Ok(());
    }
    let results = tasks::run_batch(ctx.client()?, tasks, &ctx.batch).await;
    finish_batch(ctx.output, results)
}

fn finish_batch(output: OutputFormat, results: Vec<TaskResult>) -> Result<()> {
    if output == OutputFormat::Json {
        let reports: Vec<TaskReport<'_>> = results
            .iter()
            .map(|r| TaskReport {
                description: &r.description,
                success: r.is_ok(),
                result: r.outcome.as_ref().ok().map(|o| &o.body),
                error: r.outcome.as_ref().err().map(ToString::to_string),
            })
            .collect();
        print_json(&reports)?;
    }

    let failed = tasks::filter_errors(&results).len();
    if failed > 0 {
        warn!(failed, total = results.len(), "batch finished with failures");
    }

    match tasks::first_error(results) {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
