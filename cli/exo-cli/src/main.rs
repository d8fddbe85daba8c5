// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! exo - command-line client for Exoscale compute

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod context;
mod invocation;
mod output;
mod tasks;
#[cfg(test)]
mod testing;

use commands::{InstancePoolCommand, KubeCommand, SshkeyCommand, VmCommand};
use config::{AccountOptions, EnvOverrides, Session, paths};
use context::AppContext;
use invocation::AccountRequirement;
use output::OutputFormat;
use tasks::{BatchOptions, ProgressMode};

#[derive(Parser)]
#[command(
    name = "exo",
    version,
    about = "Manage your Exoscale infrastructure easily",
    long_about = "Command-line client for the Exoscale compute API"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, env = "EXOSCALE_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Account to use, overriding the configured default
    #[arg(short, long, global = true, env = "EXOSCALE_ACCOUNT")]
    account: Option<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Maximum number of operations run at once
    #[arg(long, global = true, env = "EXOSCALE_MAX_PARALLEL", value_name = "N")]
    max_parallel: Option<NonZeroUsize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show configured accounts
    #[command(alias = "show")]
    Config,

    /// Manage virtual machines
    Vm {
        #[command(subcommand)]
        command: VmCommand,
    },

    /// Manage SSH key pairs
    Sshkey {
        #[command(subcommand)]
        command: SshkeyCommand,
    },

    /// Manage instance pools
    #[command(name = "instancepool", alias = "instance-pool")]
    InstancePool {
        #[command(subcommand)]
        command: InstancePoolCommand,
    },

    /// Manage standalone Kubernetes cluster instances
    Kube {
        #[command(subcommand)]
        command: KubeCommand,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        shell: Shell,
    },
}

impl Commands {
    /// Canonical subcommand name
    fn name(&self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Vm { .. } => "vm",
            Self::Sshkey { .. } => "sshkey",
            Self::InstancePool { .. } => "instancepool",
            Self::Kube { .. } => "kube",
            Self::Completions { .. } => "completions",
        }
    }

    /// Whether this command needs a resolved account
    fn requirement(&self) -> AccountRequirement {
        match self {
            Self::Completions { .. } => AccountRequirement::None,
            Self::Config => AccountRequirement::Optional,
            Self::Vm { .. } | Self::Sshkey { .. } | Self::InstancePool { .. } | Self::Kube { .. } => {
                AccountRequirement::Required
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Lossy copies feed the position resolver; clap gets the originals.
    let raw: Vec<std::ffi::OsString> = std::env::args_os().collect();
    let args: Vec<String> = raw
        .iter()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    let cli = Cli::parse_from(&raw);

    if cli.verbose {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("exo=debug,exoscale_client=debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Commands::Completions { shell } = command {
        clap_complete::generate(shell, &mut Cli::command(), "exo", &mut std::io::stdout());
        return Ok(());
    }

    let requirement = command.requirement();
    tracing::debug!(
        command = command.name(),
        position = invocation::resolve_position(&args, &Cli::command(), command.name()),
        ?requirement,
        "resolved invocation"
    );

    let session = Session::resolve(
        requirement,
        AccountOptions {
            config_path: cli.config.as_deref(),
            account: cli.account.as_deref(),
        },
        &EnvOverrides::from_env(),
        &paths::candidate_dirs(),
    )?;

    let output = OutputFormat::from_json_flag(cli.json);
    let batch = BatchOptions {
        max_parallel: cli.max_parallel,
        progress: if cli.json {
            ProgressMode::Quiet
        } else {
            ProgressMode::detect()
        },
    };
    let ctx = AppContext::new(session, output, batch);

    match command {
        Commands::Config => commands::config::show(&ctx),
        Commands::Vm { command } => command.run(&ctx).await,
        Commands::Sshkey { command } => command.run(&ctx).await,
        Commands::InstancePool { command } => command.run(&ctx).await,
        Commands::Kube { command } => command.run(&ctx).await,
        Commands::Completions { .. } => Ok(()),
    }
}
