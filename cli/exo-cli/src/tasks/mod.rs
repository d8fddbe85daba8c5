// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Batch execution of independent operations
//!
//! Every task of a batch runs concurrently on the tokio runtime. A failing
//! task never cancels its siblings, nothing is retried here, and no
//! timeout is applied: a hanging request hangs the batch. Results come
//! back in submission order whatever the completion order was.

mod progress;

use std::num::NonZeroUsize;
use std::sync::Arc;

use exoscale_client::{ApiClient, ClientError, Operation, Outcome};
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

pub use progress::ProgressMode;
use progress::Progress;

/// One operation and the label used to report it
#[derive(Debug, Clone)]
pub struct Task {
    pub operation: Operation,
    pub description: String,
}

impl Task {
    pub fn new(operation: Operation, description: impl Into<String>) -> Self {
        Self {
            operation,
            description: description.into(),
        }
    }
}

/// Why a task failed
#[derive(Error, Debug)]
pub enum TaskError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The task stopped before producing a result
    #[error("{description}: task did not complete")]
    Aborted { description: String },
}

/// Outcome of one task, at the same index as the task it came from
#[derive(Debug)]
pub struct TaskResult {
    pub description: String,
    pub outcome: Result<Outcome, TaskError>,
}

impl TaskResult {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Batch execution settings
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Upper bound on tasks in flight; `None` runs all of them at once
    pub max_parallel: Option<NonZeroUsize>,
    pub progress: ProgressMode,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_parallel: None,
            progress: ProgressMode::Quiet,
        }
    }
}

/// Run every task and wait for all of them
///
/// The returned vector has one entry per task, in task order.
pub async fn run_batch(
    client: Arc<dyn ApiClient>,
    tasks: Vec<Task>,
    options: &BatchOptions,
) -> Vec<TaskResult> {
    let progress = Progress::new(options.progress);
    let semaphore = options
        .max_parallel
        .map(|limit| Arc::new(Semaphore::new(limit.get())));

    let descriptions: Vec<String> = tasks.iter().map(|t| t.description.clone()).collect();
    let mut slots: Vec<Option<Result<Outcome, TaskError>>> =
        std::iter::repeat_with(|| None).take(tasks.len()).collect();

    debug!(tasks = tasks.len(), "starting batch");

    let mut set = JoinSet::new();
    for (index, task) in tasks.into_iter().enumerate() {
        let client = Arc::clone(&client);
        let semaphore = semaphore.clone();
        let tracker = progress.start(&task.description);

        set.spawn(async move {
            // The semaphore is never closed, so acquiring only waits.
            let _permit = match semaphore {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };

            debug!(index, operation = %task.operation, "submitting");
            let outcome = client
                .submit(&task.operation)
                .await
                .map_err(TaskError::from);

            match &outcome {
                Ok(_) => tracker.finish(None),
                Err(e) => tracker.finish(Some(e as &dyn std::fmt::Display)),
            }
            (index, outcome)
        });
    }

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, outcome)) => slots[index] = Some(outcome),
            Err(e) => warn!(error = %e, "batch task did not complete"),
        }
    }

    let results: Vec<TaskResult> = slots
        .into_iter()
        .zip(descriptions)
        .map(|(slot, description)| TaskResult {
            outcome: slot.unwrap_or_else(|| {
                Err(TaskError::Aborted {
                    description: description.clone(),
                })
            }),
            description,
        })
        .collect();

    debug!(
        tasks = results.len(),
        failed = results.iter().filter(|r| !r.is_ok()).count(),
        "batch finished"
    );
    results
}

/// Failures of a batch, in task order
pub fn filter_errors(results: &[TaskResult]) -> Vec<&TaskError> {
    results
        .iter()
        .filter_map(|r| r.outcome.as_ref().err())
        .collect()
}

/// First failure of a batch, if any
///
/// A batch with N-1 successes and one failure is reported the same way as
/// a batch where everything failed.
pub fn first_error(results: Vec<TaskResult>) -> Option<TaskError> {
    results.into_iter().find_map(|r| r.outcome.err())
}
