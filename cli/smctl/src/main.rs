// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! smctl - command-line client for Service Management operation tracking

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use storage_management_client::{
    CertificateCloudCredentials, ClientConfig, StorageManagementClient,
    SubscriptionCloudCredentials, TokenCloudCredentials,
};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod output;

use commands::{OperationCommand, ProfileCommand};
use config::{ConnectionOverrides, CredentialSource};

#[derive(Parser)]
#[command(
    name = "smctl",
    version,
    about = "Service Management operation CLI",
    long_about = "Track asynchronous Service Management operations by request ID"
)]
struct Cli {
    /// Profile to use
    #[arg(short, long, global = true, env = "SMCTL_PROFILE")]
    profile: Option<String>,

    /// Management endpoint override
    #[arg(short = 'U', long, global = true, env = "SMCTL_URL")]
    url: Option<String>,

    /// Subscription ID override
    #[arg(short, long, global = true, env = "SMCTL_SUBSCRIPTION_ID")]
    subscription_id: Option<String>,

    /// PEM bundle with the management certificate and key
    #[arg(long, global = true, env = "SMCTL_CERT_FILE")]
    cert_file: Option<PathBuf>,

    /// Bearer token (takes precedence over a certificate)
    #[arg(long, global = true, env = "SMCTL_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage connection profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Inspect asynchronous operations
    #[command(alias = "op")]
    Operation {
        #[command(subcommand)]
        command: OperationCommand,
    },
}

impl Cli {
    fn overrides(&self) -> ConnectionOverrides {
        ConnectionOverrides {
            url: self.url.clone(),
            subscription_id: self.subscription_id.clone(),
            cert_file: self.cert_file.clone(),
            token: self.token.clone(),
        }
    }

    /// Build a client from CLI options or profile
    async fn build_client(&self) -> Result<StorageManagementClient> {
        let connection = config::resolve_connection(self.profile.as_deref(), &self.overrides())?;

        let credentials: Arc<dyn SubscriptionCloudCredentials> = match connection.credential {
            CredentialSource::Token(token) => {
                Arc::new(TokenCloudCredentials::new(connection.subscription_id, token)?)
            }
            CredentialSource::CertFile(path) => Arc::new(
                CertificateCloudCredentials::from_pem_file(connection.subscription_id, &path)
                    .await
                    .with_context(|| format!("Failed to load certificate {}", path.display()))?,
            ),
        };

        let mut config = ClientConfig::from_env();
        if std::env::var_os("SMAPI_USER_AGENT").is_none() {
            config.user_agent = format!("smctl/{}", env!("CARGO_PKG_VERSION"));
        }

        let mut builder = StorageManagementClient::builder(credentials).config(config);
        if let Some(url) = connection.url {
            builder = builder.base_uri(url);
        }

        Ok(builder.build()?)
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("smctl=debug,storage_management_client=debug,subscription_credentials=debug")
    } else if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Profile { command } => command.clone().run(cli.json),
        Commands::Operation { command } => {
            let client = cli.build_client().await?;
            command.clone().run(&client, cli.json).await
        }
    }
}
