// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Request preparation shared by every Service Management call

use reqwest::header::HeaderValue;
use storage_management_api::{API_VERSION, VERSION_HEADER};
use subscription_credentials::{CredentialError, SubscriptionCloudCredentials};

/// Add the versioning and authentication headers to a request
///
/// The version header is set first so that credentials observe the final
/// header set if they need to.
///
/// # Errors
/// Returns an error if the credentials cannot be applied.
pub(crate) async fn add_auth_headers(
    credentials: &dyn SubscriptionCloudCredentials,
    request: &mut reqwest::Request,
) -> Result<(), CredentialError> {
    request
        .headers_mut()
        .insert(VERSION_HEADER, HeaderValue::from_static(API_VERSION));

    credentials.process_request(request).await
}
