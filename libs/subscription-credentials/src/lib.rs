// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Subscription credentials for Service Management requests
//!
//! Every Service Management call is made on behalf of a subscription. The
//! subscription ID forms part of each request URI and the caller must prove
//! it may act for that subscription. Two schemes are supported:
//!
//! - **Management certificates**: an X.509 client certificate registered with
//!   the subscription, presented during the TLS handshake
//!   ([`CertificateCloudCredentials`]).
//! - **Bearer tokens**: an access token sent in the `Authorization` header
//!   ([`TokenCloudCredentials`]).
//!
//! # Injection Points
//!
//! Credentials get two chances to act, matching where each scheme lives:
//!
//! 1. [`SubscriptionCloudCredentials::configure_client`] runs once while the
//!    HTTP client is being built (TLS identities).
//! 2. [`SubscriptionCloudCredentials::process_request`] runs for every
//!    outgoing request (headers).
//!
//! # Example
//!
//! ```ignore
//! use subscription_credentials::{SubscriptionCloudCredentials, TokenCloudCredentials};
//!
//! let credentials = TokenCloudCredentials::new("my-subscription-id", token)?;
//! let builder = credentials.configure_client(reqwest::Client::builder())?;
//! let http = builder.build()?;
//!
//! let mut request = http.get(url).build()?;
//! credentials.process_request(&mut request).await?;
//! ```

pub mod certificate;
pub mod error;
pub mod token;

pub use certificate::CertificateCloudCredentials;
pub use error::CredentialError;
pub use token::TokenCloudCredentials;

use async_trait::async_trait;

/// Credentials identifying and authenticating a subscription
#[async_trait]
pub trait SubscriptionCloudCredentials: Send + Sync + std::fmt::Debug {
    /// The subscription the credentials act for
    fn subscription_id(&self) -> &str;

    /// Adjust the HTTP client before it is built
    ///
    /// The default leaves the builder untouched.
    fn configure_client(
        &self,
        builder: reqwest::ClientBuilder,
    ) -> Result<reqwest::ClientBuilder, CredentialError> {
        Ok(builder)
    }

    /// Authenticate a single outgoing request
    ///
    /// The default leaves the request untouched.
    async fn process_request(&self, _request: &mut reqwest::Request) -> Result<(), CredentialError> {
        Ok(())
    }
}

/// Trim a subscription ID and reject it when nothing is left
pub(crate) fn normalize_subscription_id(
    subscription_id: impl Into<String>,
) -> Result<String, CredentialError> {
    let subscription_id = subscription_id.into();
    let trimmed = subscription_id.trim();
    if trimmed.is_empty() {
        return Err(CredentialError::MissingSubscriptionId);
    }
    Ok(trimmed.to_string())
}
