// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Service Management Client Library
//!
//! Typed access to the Service Management operation-tracking endpoint.
//! Most management calls are asynchronous on the server side: they answer
//! with `202 Accepted` and an `x-ms-request-id` header, and the caller then
//! asks for the status of that request until it has succeeded or failed.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use storage_management_client::{StorageManagementClient, TokenCloudCredentials, WaitOptions};
//!
//! let credentials = TokenCloudCredentials::new("my-subscription-id", token)?;
//! let client = StorageManagementClient::builder(Arc::new(credentials)).build()?;
//!
//! // One status fetch
//! let status = client.get_operation_status(&request_id).await?;
//! println!("{} is {}", status.id, status.status);
//!
//! // Poll until the operation leaves InProgress
//! let done = client
//!     .wait_for_operation(&request_id, &WaitOptions::default())
//!     .await?;
//! ```
//!
//! ## Configuration
//!
//! [`ClientConfig`] carries the base URI, request timeout and user agent. It
//! defaults to the public management endpoint and can be read from
//! `SMAPI_*` environment variables with [`ClientConfig::from_env`].

mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod wait;

pub use client::{ClientBuilder, StorageManagementClient};
pub use config::ClientConfig;
pub use error::{Error, ServiceError};
pub use wait::{MIN_POLL_INTERVAL, WaitOptions};

// Re-export the wire types and credentials for convenience
pub use storage_management_api::{
    API_VERSION, DEFAULT_BASE_URI, DecodeError, ErrorDetails, Operation, OperationStatus,
    OperationStatusResponse, REQUEST_ID_HEADER, ServiceFault, VERSION_HEADER,
};
pub use subscription_credentials::{
    CertificateCloudCredentials, CredentialError, SubscriptionCloudCredentials,
    TokenCloudCredentials,
};
