// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Profile management commands

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use dialoguer::{Confirm, Input};
use storage_management_client::DEFAULT_BASE_URI;

use crate::config::{Config, Profile};
use crate::output::{json, table};

#[derive(Subcommand, Clone)]
pub enum ProfileCommand {
    /// List all profiles
    #[command(alias = "ls")]
    List,

    /// Show profile details
    Get {
        /// Profile name (defaults to current)
        name: Option<String>,
    },

    /// Create a new profile
    Create {
        /// Profile name
        name: Option<String>,
        /// Management endpoint
        #[arg(long = "endpoint")]
        endpoint: Option<String>,
        /// Subscription ID
        #[arg(long = "subscription")]
        subscription: Option<String>,
        /// PEM bundle with the management certificate and key
        #[arg(long = "cert")]
        cert: Option<PathBuf>,
        /// Make this the current profile without asking
        #[arg(long)]
        current: bool,
    },

    /// Delete a profile
    #[command(alias = "rm")]
    Delete {
        /// Profile name(s)
        #[arg(required = true)]
        names: Vec<String>,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Set the current profile
    SetCurrent {
        /// Profile name (use '-' for previous)
        name: String,
    },
}

impl ProfileCommand {
    pub fn run(self, use_json: bool) -> Result<()> {
        match self {
            Self::List => list_profiles(use_json),
            Self::Get { name } => get_profile(name, use_json),
            Self::Create {
                name,
                endpoint,
                subscription,
                cert,
                current,
            } => create_profile(name, endpoint, subscription, cert, current),
            Self::Delete { names, force } => delete_profiles(&names, force),
            Self::SetCurrent { name } => set_current_profile(&name),
        }
    }
}

fn interactive() -> bool {
    std::io::stdin().is_terminal()
}

/// Use the given value, or prompt for it on a terminal
fn value_or_prompt(value: Option<String>, prompt: &str, flag: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if interactive() => Ok(Input::new().with_prompt(prompt).interact_text()?),
        None => anyhow::bail!("{} is required (use {})", prompt, flag),
    }
}

fn list_profiles(use_json: bool) -> Result<()> {
    let config = Config::load()?;
    let current_name = config.current_profile();

    let mut profiles = Vec::new();
    for name in Profile::list_all()? {
        match Profile::load(&name) {
            Ok(profile) => profiles.push(profile),
            Err(e) => tracing::warn!("skipping profile {}: {:#}", name, e),
        }
    }

    if use_json {
        json::print_json(&profiles)?;
    } else {
        let mut tbl = table::create_table(&["NAME", "CURR", "SUBSCRIPTION", "URL"]);
        for profile in &profiles {
            let marker = if Some(profile.name.as_str()) == current_name {
                "*"
            } else {
                ""
            };
            tbl.add_row(vec![
                profile.name.as_str(),
                marker,
                profile.subscription_id.as_str(),
                profile.url.as_str(),
            ]);
        }
        table::print_table(tbl);
    }
    Ok(())
}

fn get_profile(name: Option<String>, use_json: bool) -> Result<()> {
    let profile = match name {
        Some(n) => Profile::load(&n)?,
        None => {
            let config = Config::load()?;
            let current = config
                .current_profile()
                .ok_or_else(|| anyhow::anyhow!("No current profile set"))?;
            Profile::load(current)?
        }
    };

    if use_json {
        json::print_json(&profile)?;
    } else {
        let cert_file = profile
            .cert_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        table::print_record(&[
            ("Name", profile.name.clone()),
            ("URL", profile.url.clone()),
            ("Subscription", profile.subscription_id.clone()),
            ("Certificate", cert_file),
        ]);
    }
    Ok(())
}

fn create_profile(
    name: Option<String>,
    endpoint: Option<String>,
    subscription: Option<String>,
    cert: Option<PathBuf>,
    current: bool,
) -> Result<()> {
    let name = value_or_prompt(name, "Profile name", "NAME")?;
    crate::config::profile::validate_name(&name)?;

    if Profile::list_all()?.contains(&name) {
        return Err(anyhow::anyhow!("Profile '{}' already exists", name));
    }

    let url = match endpoint {
        Some(u) => u,
        None if interactive() => Input::new()
            .with_prompt("Management URL")
            .default(DEFAULT_BASE_URI.to_string())
            .interact_text()?,
        None => DEFAULT_BASE_URI.to_string(),
    };

    let subscription_id = value_or_prompt(subscription, "Subscription ID", "--subscription")?;

    let cert_file = match cert {
        Some(path) => Some(path),
        None if interactive() => {
            let path: String = Input::new()
                .with_prompt("Certificate PEM file (empty to use a token)")
                .allow_empty(true)
                .interact_text()?;
            (!path.trim().is_empty()).then(|| PathBuf::from(path.trim()))
        }
        None => None,
    };

    let profile = Profile {
        name: name.clone(),
        url,
        subscription_id,
        cert_file,
    };

    profile.save()?;
    println!("Created profile '{}'", name);

    let make_current = current
        || (interactive()
            && Confirm::new()
                .with_prompt("Set as current profile?")
                .default(true)
                .interact()?);
    if make_current {
        let mut config = Config::load()?;
        config.set_current_profile(&name);
        config.save()?;
        println!("Set '{}' as current profile", name);
    }

    Ok(())
}

fn delete_profiles(names: &[String], force: bool) -> Result<()> {
    if !force && !interactive() {
        anyhow::bail!("Refusing to delete without confirmation (use --force)");
    }

    let mut config = Config::load()?;
    for name in names {
        if !force
            && !Confirm::new()
                .with_prompt(format!("Delete profile '{}'?", name))
                .default(false)
                .interact()?
        {
            continue;
        }
        Profile::delete(name)?;
        config.forget_profile(name);
        println!("Deleted profile '{}'", name);
    }
    config.save()?;
    Ok(())
}

fn set_current_profile(name: &str) -> Result<()> {
    let mut config = Config::load()?;

    let name = if name == "-" {
        config
            .old_profile
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No previous profile"))?
    } else {
        name.to_string()
    };

    // Verify profile exists
    Profile::load(&name)?;

    config.set_current_profile(&name);
    config.save()?;
    println!("Current profile: {}", name);
    Ok(())
}
