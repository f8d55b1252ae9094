// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Profile management types

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storage_management_client::DEFAULT_BASE_URI;

fn default_url() -> String {
    DEFAULT_BASE_URI.to_string()
}

/// A connection profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile name
    pub name: String,

    /// Management endpoint
    #[serde(default = "default_url")]
    pub url: String,

    /// Subscription the profile operates on
    #[serde(rename = "subscriptionId")]
    pub subscription_id: String,

    /// PEM bundle with the management certificate and its key
    #[serde(rename = "certFile", skip_serializing_if = "Option::is_none")]
    pub cert_file: Option<PathBuf>,
}

impl Profile {
    /// Create a new profile
    pub fn new(name: String, url: String, subscription_id: String) -> Self {
        Self {
            name,
            url,
            subscription_id,
            cert_file: None,
        }
    }

    /// Load a profile from a file
    pub fn load(name: &str) -> Result<Self> {
        validate_name(name)?;
        let path = super::paths::profile_path(name);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read profile '{}'", name))?;
        let profile: Profile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse profile '{}'", name))?;
        Ok(profile)
    }

    /// Save the profile to a file
    pub fn save(&self) -> Result<()> {
        validate_name(&self.name)?;
        super::paths::ensure_config_dirs()?;
        let path = super::paths::profile_path(&self.name);
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Delete the profile file
    pub fn delete(name: &str) -> Result<()> {
        validate_name(name)?;
        let path = super::paths::profile_path(name);
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to delete profile '{}'", name))?;
        Ok(())
    }

    /// List all available profiles
    pub fn list_all() -> Result<Vec<String>> {
        let profiles_dir = super::paths::profiles_dir();
        if !profiles_dir.exists() {
            return Ok(vec![]);
        }

        let mut profiles = vec![];
        for entry in std::fs::read_dir(&profiles_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem()
            {
                profiles.push(stem.to_string_lossy().to_string());
            }
        }
        profiles.sort();
        Ok(profiles)
    }
}

/// Profile names become file names
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control)
    {
        anyhow::bail!("Invalid profile name '{}'", name);
    }
    Ok(())
}

/// Main configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Current active profile name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Previous profile (for `smctl profile set-current -`)
    #[serde(rename = "oldProfile", skip_serializing_if = "Option::is_none")]
    pub old_profile: Option<String>,
}

impl Config {
    /// Load the main config file
    pub fn load() -> Result<Self> {
        let path = super::paths::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Save the main config file
    pub fn save(&self) -> Result<()> {
        super::paths::ensure_config_dirs()?;
        let path = super::paths::config_file();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the current profile name
    pub fn current_profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Set the current profile
    pub fn set_current_profile(&mut self, name: &str) {
        if self.profile.as_deref() == Some(name) {
            return;
        }
        self.old_profile = self.profile.take();
        self.profile = Some(name.to_string());
    }

    /// Forget a profile that no longer exists
    pub fn forget_profile(&mut self, name: &str) {
        if self.profile.as_deref() == Some(name) {
            self.profile = None;
        }
        if self.old_profile.as_deref() == Some(name) {
            self.old_profile = None;
        }
    }
}
