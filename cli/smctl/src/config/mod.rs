// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Configuration management

pub mod paths;
pub mod profile;

pub use profile::{Config, Profile};

use std::path::PathBuf;

use anyhow::Result;

/// Connection settings given on the command line or through `SMCTL_*`
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub url: Option<String>,
    pub subscription_id: Option<String>,
    pub cert_file: Option<PathBuf>,
    pub token: Option<String>,
}

impl ConnectionOverrides {
    /// Whether a subscription ID and a credential were both given
    pub fn is_complete(&self) -> bool {
        non_empty(self.subscription_id.as_deref()).is_some()
            && (non_empty(self.token.as_deref()).is_some() || self.cert_file.is_some())
    }
}

/// How requests are authenticated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Token(String),
    CertFile(PathBuf),
}

/// Fully resolved connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Endpoint, when one was configured; the client default applies otherwise
    pub url: Option<String>,
    pub subscription_id: String,
    pub credential: CredentialSource,
}

/// Load the profile connection settings should fall back to
///
/// Priority:
/// 1. CLI --profile argument (or SMCTL_PROFILE)
/// 2. Current profile from config.json
pub fn selected_profile(cli_profile: Option<&str>) -> Result<Option<Profile>> {
    if let Some(name) = cli_profile {
        return Profile::load(name).map(Some);
    }

    let config = Config::load()?;
    match config.current_profile() {
        Some(name) => Profile::load(name).map(Some),
        None => Ok(None),
    }
}

/// Resolve connection settings from flags and the selected profile
pub fn resolve_connection(
    cli_profile: Option<&str>,
    overrides: &ConnectionOverrides,
) -> Result<Connection> {
    let profile = match selected_profile(cli_profile) {
        Ok(profile) => profile,
        // A stale current profile must not block a fully specified connection.
        Err(e) if cli_profile.is_none() && overrides.is_complete() => {
            tracing::warn!("ignoring current profile: {:#}", e);
            None
        }
        Err(e) => return Err(e),
    };
    merge_connection(profile.as_ref(), overrides)
}

/// Flags win over the profile; a token wins over a certificate file
pub fn merge_connection(
    profile: Option<&Profile>,
    overrides: &ConnectionOverrides,
) -> Result<Connection> {
    let url = non_empty(overrides.url.as_deref())
        .or_else(|| profile.and_then(|p| non_empty(Some(p.url.as_str()))));

    let subscription_id = non_empty(overrides.subscription_id.as_deref())
        .or_else(|| profile.and_then(|p| non_empty(Some(p.subscription_id.as_str()))))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No subscription ID configured. Use --subscription-id, SMCTL_SUBSCRIPTION_ID or 'smctl profile create'"
            )
        })?;

    let credential = if let Some(token) = non_empty(overrides.token.as_deref()) {
        CredentialSource::Token(token)
    } else if let Some(path) = overrides
        .cert_file
        .clone()
        .or_else(|| profile.and_then(|p| p.cert_file.clone()))
    {
        CredentialSource::CertFile(path)
    } else {
        anyhow::bail!(
            "No credentials configured. Use --token/SMCTL_TOKEN or --cert-file/SMCTL_CERT_FILE"
        );
    };

    Ok(Connection {
        url,
        subscription_id,
        credential,
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
