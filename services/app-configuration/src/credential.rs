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

use std::fmt::{Debug, Formatter};
use std::str::FromStr;

use azsign_core::hash::base64_decode;
use azsign_core::utils::Redact;
use azsign_core::{Error, Result, SigningCredential};
use http::Uri;

use crate::constants::*;

/// Credential of a configuration store: endpoint, key id and shared secret.
///
/// Parsed once from a connection string and never mutated afterwards. Clones
/// are cheap enough to hand one to every signer that needs it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    endpoint: Uri,
    host: String,
    id: String,
    secret: Vec<u8>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("endpoint", &self.endpoint)
            .field("id", &Redact::from(&self.id))
            .field("secret", &Redact::from(&self.secret))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.host.is_empty() && !self.id.is_empty() && !self.secret.is_empty()
    }
}

impl Credential {
    /// Create a credential from its parts.
    ///
    /// Only the endpoint is checked here. An empty id or secret produces a
    /// credential that [`SigningCredential::is_valid`] rejects, and signing
    /// with it fails.
    pub fn new(endpoint: &str, id: &str, secret: impl Into<Vec<u8>>) -> Result<Self> {
        let (endpoint, host) = parse_endpoint(endpoint).map_err(|msg| {
            Error::credential_invalid(format!("invalid endpoint {endpoint:?}: {msg}"))
        })?;

        Ok(Self {
            endpoint,
            host,
            id: id.to_string(),
            secret: secret.into(),
        })
    }

    /// Parse a connection string like `Endpoint=https://x.azconfig.io;Id=key-id;Secret=c2VjcmV0`.
    ///
    /// - Segments are separated by `;` and may come in any order.
    /// - Keys are matched case-insensitively, values keep their case.
    /// - Only the first `=` splits a segment, so base64 padding survives.
    /// - Unknown keys are ignored, the last occurrence of a key wins.
    pub fn from_connection_string(conn_str: &str) -> Result<Self> {
        let segments: Vec<&str> = conn_str
            .split(';')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect();
        if segments.len() < 3 {
            return Err(Error::connection_string_malformed(format!(
                "expected Endpoint, Id and Secret segments, got {} segments",
                segments.len()
            )));
        }

        let (mut endpoint, mut id, mut secret) = (None, None, None);
        for segment in segments {
            let (key, value) = segment.split_once('=').ok_or_else(|| {
                Error::connection_string_malformed(format!(
                    "expected '=' in segment starting with {:?}",
                    segment.chars().take(8).collect::<String>()
                ))
            })?;
            let key = key.trim();
            let value = value.trim();

            if key.eq_ignore_ascii_case(CONNECTION_STRING_ENDPOINT) {
                endpoint = Some(value);
            } else if key.eq_ignore_ascii_case(CONNECTION_STRING_ID) {
                id = Some(value);
            } else if key.eq_ignore_ascii_case(CONNECTION_STRING_SECRET) {
                secret = Some(value);
            }
        }

        let endpoint = required(endpoint, "Endpoint")?;
        let id = required(id, "Id")?;
        let secret = base64_decode(required(secret, "Secret")?).map_err(|e| {
            Error::connection_string_malformed("Secret is not valid base64").with_source(e)
        })?;
        if secret.is_empty() {
            return Err(Error::connection_string_malformed(
                "Secret decodes to zero bytes",
            ));
        }

        let (endpoint, host) = parse_endpoint(endpoint).map_err(|msg| {
            Error::connection_string_malformed(format!("invalid Endpoint {endpoint:?}: {msg}"))
        })?;

        Ok(Self {
            endpoint,
            host,
            id: id.to_string(),
            secret,
        })
    }

    /// Service endpoint.
    pub fn endpoint(&self) -> &Uri {
        &self.endpoint
    }

    /// Host portion of the endpoint, used as the signed `host` header.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Key id sent in the `Credential=` part of the authorization header.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Decoded shared secret.
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl FromStr for Credential {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_connection_string(s)
    }
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(Error::connection_string_malformed(format!(
            "{name} must not be empty"
        ))),
        None => Err(Error::connection_string_malformed(format!(
            "{name} is missing"
        ))),
    }
}

/// Check that `endpoint` is an absolute http(s) url and extract its host.
fn parse_endpoint(endpoint: &str) -> std::result::Result<(Uri, String), String> {
    let uri: Uri = endpoint.parse().map_err(|e| format!("{e}"))?;

    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        Some(other) => return Err(format!("unsupported scheme {other}")),
        None => return Err("url must be absolute".to_string()),
    }
    let host = match uri.host() {
        Some(h) if !h.is_empty() => h.to_string(),
        _ => return Err("url has no host".to_string()),
    };

    Ok((uri, host))
}
