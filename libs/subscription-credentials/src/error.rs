// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for subscription-credentials

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or applying credentials
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The subscription ID was empty
    #[error("Subscription ID must not be empty")]
    MissingSubscriptionId,

    /// The bearer token was empty
    #[error("Access token must not be empty")]
    MissingToken,

    /// The certificate bundle could not be read from disk
    #[error("Failed to read certificate {}: {source}", .path.display())]
    CertificateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The certificate bundle is not a usable PEM certificate and key
    #[error("Invalid certificate: {0}")]
    InvalidCertificate(String),

    /// A credential could not be encoded as an HTTP header value
    #[error("Invalid value for header {0}")]
    InvalidHeader(&'static str),
}
