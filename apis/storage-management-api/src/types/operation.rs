// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Asynchronous operation tracking types

use serde::{Deserialize, Serialize};

/// Progress of an asynchronous management operation
///
/// The string forms match the `<Status>` element text exactly.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
pub enum OperationStatus {
    InProgress,
    Succeeded,
    Failed,
}

impl OperationStatus {
    /// True once the operation has stopped running
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Error details of a failed operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Management error code (e.g. "ResourceNotFound")
    pub code: String,
    /// Human-readable description
    pub message: String,
}

/// Decoded `<Operation>` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Request id of the tracked operation
    pub id: String,
    /// Current status
    pub status: OperationStatus,
    /// HTTP status the operation finished with; absent while in progress
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status_code: Option<u16>,
    /// Failure details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
}

/// Result of a Get Operation Status call
///
/// Note that `status_code` is the HTTP status of the status request itself,
/// while `http_status_code` is the one the tracked operation finished with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationStatusResponse {
    pub id: String,
    pub status: OperationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Value of the `x-ms-request-id` response header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub status_code: u16,
}

impl OperationStatusResponse {
    /// Combine a decoded body with the transport facts of the response
    pub fn new(operation: Operation, status_code: u16, request_id: Option<String>) -> Self {
        Self {
            id: operation.id,
            status: operation.status,
            http_status_code: operation.http_status_code,
            error: operation.error,
            request_id,
            status_code,
        }
    }
}
