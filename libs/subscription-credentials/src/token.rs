// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Bearer token credentials

use crate::error::CredentialError;
use crate::{SubscriptionCloudCredentials, normalize_subscription_id};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Authenticates with an access token in the `Authorization` header
#[derive(Debug)]
pub struct TokenCloudCredentials {
    subscription_id: String,
    token: SecretString,
}

impl TokenCloudCredentials {
    /// Create token credentials
    ///
    /// # Errors
    /// Returns an error if the subscription ID or the token is empty.
    pub fn new(
        subscription_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, CredentialError> {
        let subscription_id = normalize_subscription_id(subscription_id)?;
        let token = token.into();
        if token.trim().is_empty() {
            return Err(CredentialError::MissingToken);
        }
        Ok(Self {
            subscription_id,
            token: SecretString::from(token.trim().to_string()),
        })
    }

    fn authorization_value(&self) -> Result<HeaderValue, CredentialError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token.expose_secret()))
            .map_err(|_| CredentialError::InvalidHeader("authorization"))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

#[async_trait]
impl SubscriptionCloudCredentials for TokenCloudCredentials {
    fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    async fn process_request(&self, request: &mut reqwest::Request) -> Result<(), CredentialError> {
        let value = self.authorization_value()?;
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }
}
