// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Per-task progress display

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// How task progress is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// One spinner per task on stderr
    Spinners,
    /// One line per finished task on stderr
    Lines,
    /// Nothing
    Quiet,
}

impl ProgressMode {
    /// Spinners on a terminal, plain lines otherwise
    pub fn detect() -> Self {
        if std::io::stderr().is_terminal() {
            Self::Spinners
        } else {
            Self::Lines
        }
    }
}

/// Progress display shared by every task of a batch
pub(crate) struct Progress {
    mode: ProgressMode,
    multi: MultiProgress,
}

impl Progress {
    pub(crate) fn new(mode: ProgressMode) -> Self {
        let multi = match mode {
            ProgressMode::Spinners => MultiProgress::with_draw_target(ProgressDrawTarget::stderr()),
            ProgressMode::Lines | ProgressMode::Quiet => {
                MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
            }
        };
        Self { mode, multi }
    }

    /// Start tracking one task
    pub(crate) fn start(&self, description: &str) -> TaskProgress {
        let bar = match self.mode {
            ProgressMode::Spinners => {
                let bar = self.multi.add(ProgressBar::new_spinner());
                let style = ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner());
                bar.set_style(style);
                bar.set_message(description.to_string());
                bar.enable_steady_tick(Duration::from_millis(100));
                Some(bar)
            }
            ProgressMode::Lines | ProgressMode::Quiet => None,
        };
        TaskProgress {
            mode: self.mode,
            description: description.to_string(),
            bar,
        }
    }
}

/// Progress handle owned by one running task
pub(crate) struct TaskProgress {
    mode: ProgressMode,
    description: String,
    bar: Option<ProgressBar>,
}

impl TaskProgress {
    pub(crate) fn finish(self, error: Option<&dyn std::fmt::Display>) {
        let message = match error {
            None => format!("{}: done", self.description),
            Some(e) => format!("{}: failed: {}", self.description, e),
        };
        match (self.mode, self.bar) {
            (ProgressMode::Spinners, Some(bar)) => bar.finish_with_message(message),
            (ProgressMode::Lines, _) => eprintln!("{message}"),
            _ => {}
        }
    }
}
