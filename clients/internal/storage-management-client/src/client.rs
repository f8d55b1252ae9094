// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Service Management HTTP client

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::StatusCode;
use storage_management_api::{OperationStatusResponse, REQUEST_ID_HEADER, decode_operation};
use subscription_credentials::SubscriptionCloudCredentials;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::auth::add_auth_headers;
use crate::config::ClientConfig;
use crate::error::{Error, ServiceError};

/// Correlates the log lines of one call
static NEXT_INVOCATION_ID: AtomicU64 = AtomicU64::new(1);

/// Builder for [`StorageManagementClient`]
#[derive(Debug)]
pub struct ClientBuilder {
    credentials: Arc<dyn SubscriptionCloudCredentials>,
    config: ClientConfig,
}

impl ClientBuilder {
    /// Replace the whole configuration, e.g. with [`ClientConfig::from_env`]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the management endpoint
    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.config.base_uri = base_uri.into();
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns an error if the base URI is not an absolute http(s) URL, the
    /// credentials cannot configure TLS, or the HTTP client fails to build.
    pub fn build(self) -> Result<StorageManagementClient, Error> {
        let base_uri = parse_base_uri(&self.config.base_uri)?;

        install_crypto_provider();

        let builder = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent.as_str());
        let http = self.credentials.configure_client(builder)?.build()?;

        Ok(StorageManagementClient {
            http,
            base_uri,
            credentials: self.credentials,
        })
    }
}

fn parse_base_uri(base_uri: &str) -> Result<Url, Error> {
    let url =
        Url::parse(base_uri.trim()).map_err(|e| Error::InvalidUrl(format!("{base_uri}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::InvalidUrl(format!("{base_uri}: unsupported scheme {other}"))),
    }
}

/// reqwest is built without a default rustls provider
fn install_crypto_provider() {
    // Err only means a provider is already installed
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Client for the Service Management operation-tracking API
///
/// Cloning is cheap: clones share the connection pool and credentials.
#[derive(Clone, Debug)]
pub struct StorageManagementClient {
    http: reqwest::Client,
    base_uri: Url,
    credentials: Arc<dyn SubscriptionCloudCredentials>,
}

impl StorageManagementClient {
    /// Start building a client for the given credentials
    pub fn builder(credentials: Arc<dyn SubscriptionCloudCredentials>) -> ClientBuilder {
        ClientBuilder {
            credentials,
            config: ClientConfig::default(),
        }
    }

    /// Management endpoint all requests are sent to
    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    pub fn credentials(&self) -> &dyn SubscriptionCloudCredentials {
        self.credentials.as_ref()
    }

    /// `{base}/{subscription}/operations/{request_id}`
    fn operation_url(&self, request_id: &str) -> Result<Url, Error> {
        let mut url = self.base_uri.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base_uri.to_string()))?
            .pop_if_empty()
            .push(self.credentials.subscription_id().trim())
            .push("operations")
            .push(request_id);
        Ok(url)
    }

    /// Get the status of an asynchronous management operation
    ///
    /// `request_id` is the `x-ms-request-id` value returned by the call that
    /// started the operation.
    ///
    /// # Errors
    /// - [`Error::MissingArgument`] for a blank request ID; nothing is sent
    /// - [`Error::Service`] for any non-200 response
    /// - [`Error::Decode`] for a 200 response with an unusable body
    /// - [`Error::Http`] for transport failures
    #[instrument(
        skip(self),
        fields(invocation_id = NEXT_INVOCATION_ID.fetch_add(1, Ordering::Relaxed))
    )]
    pub async fn get_operation_status(
        &self,
        request_id: &str,
    ) -> Result<OperationStatusResponse, Error> {
        let request_id = request_id.trim();
        if request_id.is_empty() {
            return Err(Error::MissingArgument("request_id"));
        }

        let url = self.operation_url(request_id)?;
        let mut request = self.http.get(url).build()?;
        add_auth_headers(self.credentials.as_ref(), &mut request).await?;

        debug!(url = %request.url(), "GET operation status");
        let response = self.http.execute(request).await?;

        let status = response.status();
        let service_request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if status != StatusCode::OK {
            // A truncated fault body must not hide the status.
            let body = match response.bytes().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(error = %e, "failed to read error body");
                    Default::default()
                }
            };
            let err = ServiceError::from_response(status, &body, service_request_id);
            warn!(
                status = status.as_u16(),
                code = err.code.as_deref().unwrap_or("-"),
                "operation status request rejected: {}",
                err.message
            );
            return Err(err.into());
        }

        let body = response.bytes().await?;
        let operation = decode_operation(&body)?;
        debug!(id = %operation.id, status = %operation.status, "operation status received");

        Ok(OperationStatusResponse::new(
            operation,
            status.as_u16(),
            service_request_id,
        ))
    }

    /// Run [`get_operation_status`](Self::get_operation_status) on the tokio
    /// runtime and return a handle to its result
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_get_operation_status(
        &self,
        request_id: impl Into<String>,
    ) -> JoinHandle<Result<OperationStatusResponse, Error>> {
        let client = self.clone();
        let request_id = request_id.into();
        tokio::spawn(async move { client.get_operation_status(&request_id).await })
    }
}
