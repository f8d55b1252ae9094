// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for storage-management-client

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use storage_management_api::{DecodeError, ErrorDetails, OperationStatus, decode_service_fault};
use subscription_credentials::CredentialError;
use thiserror::Error;
use tracing::debug;

/// Errors returned by the client
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was missing or blank
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// The base URI cannot carry a request path
    #[error("Invalid base URI: {0}")]
    InvalidUrl(String),

    #[error("Credential error: {0}")]
    Credentials(#[from] CredentialError),

    /// Transport failure: connection, TLS, timeout or body read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with something other than 200 OK
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A 200 response whose body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(#[from] DecodeError),

    /// The tracked operation reached the Failed state
    #[error(
        "Operation {request_id} failed: {}",
        failure_summary(.http_status_code, .error)
    )]
    OperationFailed {
        request_id: String,
        http_status_code: Option<u16>,
        error: Option<ErrorDetails>,
    },

    /// The operation was still running when the wait deadline passed
    #[error("Timed out after {}s waiting for operation {request_id} (last status: {last_status})", .timeout.as_secs())]
    Timeout {
        request_id: String,
        timeout: Duration,
        last_status: OperationStatus,
    },

    /// A spawned request panicked or was cancelled
    #[error("Background request failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    /// HTTP status associated with this error, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Service(e) => Some(e.status),
            Error::Http(e) => e.status(),
            _ => None,
        }
    }

    /// True when the service reported that the request ID is unknown
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// The service fault, when the service rejected the request
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Error::Service(e) => Some(e),
            _ => None,
        }
    }
}

fn failure_summary(http_status_code: &Option<u16>, error: &Option<ErrorDetails>) -> String {
    let detail = match error {
        Some(ErrorDetails { code, message }) if !code.is_empty() && !message.is_empty() => {
            format!("{code}: {message}")
        }
        Some(ErrorDetails { code, .. }) if !code.is_empty() => code.clone(),
        Some(ErrorDetails { message, .. }) if !message.is_empty() => message.clone(),
        _ => "no error details reported".to_string(),
    };
    match http_status_code {
        Some(status) => format!("{detail} (HTTP {status})"),
        None => detail,
    }
}

/// A non-success response from the management service
///
/// Built from the XML `<Error>` fault in the response body. When the body is
/// missing or not a fault document, the message falls back to the reason
/// phrase of the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub status: StatusCode,
    pub code: Option<String>,
    pub message: String,
    pub request_id: Option<String>,
}

impl ServiceError {
    /// Build a service error from a failed response
    pub fn from_response(status: StatusCode, body: &[u8], request_id: Option<String>) -> Self {
        let fault = match decode_service_fault(body) {
            Ok(fault) => fault,
            Err(e) => {
                debug!(error = %e, "error body is not an XML fault");
                Default::default()
            }
        };

        let message = fault
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| reason_phrase(status));

        Self {
            status,
            code: fault.code.filter(|c| !c.trim().is_empty()),
            message,
            request_id,
        }
    }
}

fn reason_phrase(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(
                f,
                "{}: {} (HTTP {})",
                code,
                self.message,
                self.status.as_u16()
            ),
            None => write!(f, "{} (HTTP {})", self.message, self.status.as_u16()),
        }
    }
}

impl std::error::Error for ServiceError {}
