// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Service fault body

use serde::{Deserialize, Serialize};

/// Error body returned with a non-200 response
///
/// ```text
/// <Error xmlns="http://schemas.microsoft.com/windowsazure">
///   <Code>ResourceNotFound</Code>
///   <Message>The operation request ID was not found.</Message>
/// </Error>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFault {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl ServiceFault {
    /// True when neither a code nor a message was found
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.message.is_none()
    }
}
