// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables.

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Log filter directive, e.g. `info` or `gothic_tools=debug`.
    pub log: String,
    /// Write scene JSON indented.
    pub pretty: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            log: std::env::var("GOTHIC_LOG").unwrap_or_else(|_| "info".into()),
            pretty: std::env::var("GOTHIC_PRETTY")
                .unwrap_or_else(|_| "true".into())
                .parse()
                .unwrap_or(true),
        }
    }
}
