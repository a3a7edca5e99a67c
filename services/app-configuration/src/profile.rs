// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use http::header::{DATE, HOST};
use http::HeaderName;

use crate::constants::*;

/// SigningProfile selects the header names bound into the signature.
///
/// Both variants sign `host`, a date header and a content hash header, in
/// that order. They only differ in which header carries the date, so the
/// server verifier must be configured with the same profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningProfile {
    date_header: HeaderName,
    content_hash_header: HeaderName,
}

impl Default for SigningProfile {
    fn default() -> Self {
        Self::current()
    }
}

impl SigningProfile {
    /// Profile used by current configuration store clients: `x-ms-date` and `x-ms-content-sha256`.
    pub fn current() -> Self {
        Self {
            date_header: X_MS_DATE,
            content_hash_header: X_MS_CONTENT_SHA256,
        }
    }

    /// Profile used by legacy clients that send the standard `Date` header.
    pub fn legacy() -> Self {
        Self {
            date_header: DATE,
            content_hash_header: X_MS_CONTENT_SHA256,
        }
    }

    /// Build a profile with custom header names.
    pub fn new(date_header: HeaderName, content_hash_header: HeaderName) -> Self {
        Self {
            date_header,
            content_hash_header,
        }
    }

    /// Header carrying the request timestamp.
    pub fn date_header(&self) -> &HeaderName {
        &self.date_header
    }

    /// Header carrying the base64 SHA-256 body digest.
    pub fn content_hash_header(&self) -> &HeaderName {
        &self.content_hash_header
    }

    /// Signed header names in signing order.
    pub fn signed_headers(&self) -> [&str; 3] {
        ["host", self.date_header.as_str(), self.content_hash_header.as_str()]
    }

    pub(crate) fn signed_header_names(&self) -> [HeaderName; 3] {
        [
            HOST,
            self.date_header.clone(),
            self.content_hash_header.clone(),
        ]
    }

    /// The `SignedHeaders=` value, e.g. `host;x-ms-date;x-ms-content-sha256`.
    pub fn signed_headers_list(&self) -> String {
        self.signed_headers().join(";")
    }
}
