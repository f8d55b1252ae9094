// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Client configuration

use std::time::Duration;

use storage_management_api::DEFAULT_BASE_URI;

/// Default per-request timeout (seconds)
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Management endpoint; validated when the client is built
    pub base_uri: String,
    /// Timeout applied to every HTTP request
    pub timeout: Duration,
    /// `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `SMAPI_BASE_URI`, `SMAPI_TIMEOUT_SECS` and `SMAPI_USER_AGENT`.
    /// Unset, empty or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_uri = lookup("SMAPI_BASE_URI")
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().to_string())
            .unwrap_or(defaults.base_uri);

        let timeout = lookup("SMAPI_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let user_agent = lookup("SMAPI_USER_AGENT")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.user_agent);

        Self {
            base_uri,
            timeout,
            user_agent,
        }
    }
}

fn default_user_agent() -> String {
    format!("storage-management-client/{}", env!("CARGO_PKG_VERSION"))
}
