// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Configuration management

pub mod account;
mod error;
pub mod paths;
pub mod session;

pub use account::{AccountProfile, ConfigurationSet};
pub use error::ConfigError;
pub use session::{AccountOptions, EnvOverrides, Session};
