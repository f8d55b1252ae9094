// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Operation status commands

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Subcommand;
use storage_management_client::{
    OperationStatus, OperationStatusResponse, StorageManagementClient, WaitOptions,
};

use crate::output::{json, table};

#[derive(Subcommand, Clone)]
pub enum OperationCommand {
    /// Show the status of an asynchronous operation
    Get {
        /// Request ID returned by the call that started the operation
        request_id: String,
    },

    /// Wait for an operation to succeed or fail
    Wait {
        /// Request ID returned by the call that started the operation
        request_id: String,
        /// Give up after this many seconds
        #[arg(short, long, default_value_t = 600)]
        timeout: u64,
        /// Seconds between status requests
        #[arg(short, long, default_value_t = 2)]
        interval: u64,
    },
}

impl OperationCommand {
    pub async fn run(self, client: &StorageManagementClient, use_json: bool) -> Result<()> {
        match self {
            Self::Get { request_id } => get(client, &request_id, use_json).await,
            Self::Wait {
                request_id,
                timeout,
                interval,
            } => {
                let options = WaitOptions {
                    timeout: Duration::from_secs(timeout),
                    interval: Duration::from_secs(interval.max(1)),
                };
                wait(client, &request_id, &options, use_json).await
            }
        }
    }
}

async fn get(client: &StorageManagementClient, request_id: &str, use_json: bool) -> Result<()> {
    let status = client
        .get_operation_status(request_id)
        .await
        .with_context(|| format!("Failed to get status of operation {}", request_id.trim()))?;
    print_status(&status, use_json)
}

async fn wait(
    client: &StorageManagementClient,
    request_id: &str,
    options: &WaitOptions,
    use_json: bool,
) -> Result<()> {
    let mut last: Option<OperationStatus> = None;
    let status = client
        .wait_for_operation_with_progress(request_id, options, |s| {
            if !use_json && last != Some(s.status) {
                eprintln!("Operation {}: {}", s.id, s.status);
            }
            last = Some(s.status);
        })
        .await
        .with_context(|| format!("Failed waiting for operation {}", request_id.trim()))?;
    print_status(&status, use_json)
}

fn print_status(status: &OperationStatusResponse, use_json: bool) -> Result<()> {
    if use_json {
        return json::print_json(status);
    }
    table::print_record(&status_fields(status));
    Ok(())
}

fn status_fields(status: &OperationStatusResponse) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("ID", status.id.clone()),
        ("Status", status.status.to_string()),
    ];
    if let Some(code) = status.http_status_code {
        fields.push(("HTTP Status", code.to_string()));
    }
    if let Some(error) = &status.error {
        fields.push(("Error Code", error.code.clone()));
        fields.push(("Error Message", error.message.clone()));
    }
    if let Some(request_id) = &status.request_id {
        fields.push(("Request ID", request_id.clone()));
    }
    fields
}
