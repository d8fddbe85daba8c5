// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Invocation classification
//!
//! Help, completions and bare `exo` never touch the configuration,
//! `exo config` tolerates a missing one and every resource command
//! requires it. The requirement itself comes from the parsed command;
//! [`resolve_position`] locates a subcommand in the raw argument vector.

use clap::Command;

/// How a registered flag treats the token after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Switch with no value (`-f`, `--verbose`)
    Boolean,
    /// Consumes the next token as its value (`-z zone`)
    Value,
    /// Not a registered flag
    Unknown,
}

/// Something that knows which flags exist and whether they take a value
pub trait FlagLookup {
    /// Classify a flag by its bare name (no leading dashes)
    fn flag_kind(&self, name: &str) -> FlagKind;
}

impl FlagLookup for Command {
    fn flag_kind(&self, name: &str) -> FlagKind {
        let mut chars = name.chars();
        let short = match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        };

        let found = self.get_arguments().find(|arg| {
            arg.get_long() == Some(name)
                || arg
                    .get_all_aliases()
                    .is_some_and(|aliases| aliases.contains(&name))
                || (short.is_some() && arg.get_short() == short)
        });

        match found {
            Some(arg) if arg.get_action().takes_values() => FlagKind::Value,
            Some(_) => FlagKind::Boolean,
            None => self
                .get_subcommands()
                .map(|sub| sub.flag_kind(name))
                .find(|kind| *kind != FlagKind::Unknown)
                .unwrap_or(FlagKind::Unknown),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Flag,
    FlagValue,
    Word,
}

/// Tag each token as a flag, a flag's value, or a plain word
fn scan<'a, S, F>(args: &'a [S], flags: &F) -> Vec<(Role, &'a str)>
where
    S: AsRef<str>,
    F: FlagLookup + ?Sized,
{
    let mut tokens = Vec::with_capacity(args.len());
    let mut expect_value = false;
    let mut only_words = false;

    for arg in args {
        let token = arg.as_ref();

        if only_words {
            tokens.push((Role::Word, token));
            continue;
        }
        if token == "--" {
            only_words = true;
            tokens.push((Role::Flag, token));
            continue;
        }
        if let Some(name) = token.strip_prefix("--") {
            // `--flag=value` carries its own value.
            expect_value = !name.contains('=') && flags.flag_kind(name) == FlagKind::Value;
            tokens.push((Role::Flag, token));
            continue;
        }
        if let Some(cluster) = token.strip_prefix('-').filter(|c| !c.is_empty()) {
            expect_value = short_cluster_expects_value(cluster, flags);
            tokens.push((Role::Flag, token));
            continue;
        }
        if expect_value {
            expect_value = false;
            tokens.push((Role::FlagValue, token));
            continue;
        }
        tokens.push((Role::Word, token));
    }

    tokens
}

/// Whether a short cluster such as `-ja` leaves its last flag waiting for
/// the next token
///
/// The first value-taking flag of a cluster swallows the rest of it
/// (`-zpreprod`), so only a value flag in last place consumes a token.
fn short_cluster_expects_value<F: FlagLookup + ?Sized>(cluster: &str, flags: &F) -> bool {
    let mut chars = cluster.char_indices().peekable();
    while let Some((at, c)) = chars.next() {
        let name = &cluster[at..at + c.len_utf8()];
        if flags.flag_kind(name) == FlagKind::Value {
            return chars.peek().is_none();
        }
    }
    false
}

/// Position of `target` in `args`, 1-based, not counting flag values
///
/// Every examined token moves the position forward except values consumed
/// by value-taking flags. The walk stops at the first plain word equal to
/// `target`; when there is none the count of every countable token plus
/// one is returned. An empty argument list yields 1.
///
/// ```text
/// ["-z", "preprod", "delete", "mypool"], "delete"  => 2
/// ["-f", "--verbose", "delete"], "delete"          => 3
/// ```
pub fn resolve_position<S, F>(args: &[S], flags: &F, target: &str) -> usize
where
    S: AsRef<str>,
    F: FlagLookup + ?Sized,
{
    let mut position = 1;
    for (role, token) in scan(args, flags) {
        match role {
            Role::FlagValue => continue,
            Role::Word if token == target => break,
            Role::Flag | Role::Word => position += 1,
        }
    }
    position
}

/// Whether an invocation needs a resolved account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRequirement {
    /// Configuration is never loaded
    None,
    /// Load it, but a configuration that cannot be loaded is not fatal
    Optional,
    /// Any configuration or account error is fatal
    Required,
}
