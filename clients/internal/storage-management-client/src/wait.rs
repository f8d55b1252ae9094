// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Poll an operation until it reaches a terminal state

use std::time::{Duration, Instant};

use storage_management_api::{OperationStatus, OperationStatusResponse};
use tokio::time::sleep;
use tracing::debug;

use crate::client::StorageManagementClient;
use crate::error::Error;

/// Default time to wait for an operation (seconds)
const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 600;

/// Default delay between polls (seconds)
const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;

/// Shortest delay ever used between polls
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Polling parameters for [`StorageManagementClient::wait_for_operation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Give up once this much time has passed
    pub timeout: Duration,
    /// Delay between status requests, raised to [`MIN_POLL_INTERVAL`] if
    /// shorter
    pub interval: Duration,
}

impl WaitOptions {
    /// The delay actually slept between polls
    pub fn effective_interval(&self) -> Duration {
        self.interval.max(MIN_POLL_INTERVAL)
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

impl StorageManagementClient {
    /// Poll until the operation succeeds or fails
    ///
    /// # Errors
    /// - [`Error::OperationFailed`] when the operation ends in `Failed`
    /// - [`Error::Timeout`] when it is still `InProgress` at the deadline
    /// - any error from [`get_operation_status`](Self::get_operation_status),
    ///   which stops polling immediately
    pub async fn wait_for_operation(
        &self,
        request_id: &str,
        options: &WaitOptions,
    ) -> Result<OperationStatusResponse, Error> {
        self.wait_for_operation_with_progress(request_id, options, |_| {})
            .await
    }

    /// Like [`wait_for_operation`](Self::wait_for_operation), calling
    /// `on_poll` with every status received
    pub async fn wait_for_operation_with_progress<F>(
        &self,
        request_id: &str,
        options: &WaitOptions,
        mut on_poll: F,
    ) -> Result<OperationStatusResponse, Error>
    where
        F: FnMut(&OperationStatusResponse),
    {
        let start = Instant::now();

        loop {
            let response = self.get_operation_status(request_id).await?;
            on_poll(&response);

            match response.status {
                OperationStatus::Succeeded => return Ok(response),
                OperationStatus::Failed => {
                    return Err(Error::OperationFailed {
                        request_id: request_id.trim().to_string(),
                        http_status_code: response.http_status_code,
                        error: response.error,
                    });
                }
                OperationStatus::InProgress => {}
            }

            let elapsed = start.elapsed();
            if elapsed >= options.timeout {
                return Err(Error::Timeout {
                    request_id: request_id.trim().to_string(),
                    timeout: options.timeout,
                    last_status: response.status,
                });
            }

            debug!(
                request_id = request_id.trim(),
                elapsed_ms = elapsed.as_millis() as u64,
                "operation still in progress"
            );
            sleep(options.effective_interval().min(options.timeout - elapsed)).await;
        }
    }
}
