// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Service Management wire definitions
//!
//! This crate holds the types exchanged with the Service Management REST API
//! for operation tracking, together with the protocol constants and the
//! streaming XML decoders that turn response bodies into those types.
//!
//! The API speaks XML. Every element of interest lives in the
//! [`XML_NAMESPACE`] schema namespace:
//!
//! ```text
//! <Operation xmlns="http://schemas.microsoft.com/windowsazure">
//!   <ID>5f3c...</ID>
//!   <Status>Failed</Status>
//!   <HttpStatusCode>400</HttpStatusCode>
//!   <Error>
//!     <Code>MissingOrIncorrectVersionHeader</Code>
//!     <Message>The versioning header is not specified or was specified incorrectly.</Message>
//!   </Error>
//! </Operation>
//! ```

pub mod types;
pub mod xml;

pub use types::*;
pub use xml::{DecodeError, decode_operation, decode_service_fault};

/// Schema namespace of every Service Management XML element
pub const XML_NAMESPACE: &str = "http://schemas.microsoft.com/windowsazure";

/// API version sent with every request
pub const API_VERSION: &str = "2013-03-01";

/// Request header carrying [`API_VERSION`]
pub const VERSION_HEADER: &str = "x-ms-version";

/// Response header naming the request (and the asynchronous operation it started)
pub const REQUEST_ID_HEADER: &str = "x-ms-request-id";

/// Management endpoint used when no base URI is configured
pub const DEFAULT_BASE_URI: &str = "https://management.core.windows.net";
