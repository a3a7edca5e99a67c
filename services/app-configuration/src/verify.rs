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

use azsign_core::hash::{base64_sha256, verify_base64_hmac_sha256};
use azsign_core::{Result, SignedRequest};
use http::{header, HeaderMap, Method, Uri};
use log::debug;

use crate::constants::*;
use crate::sign_request::string_to_sign_of;
use crate::{Credential, SigningProfile};

/// Verifier checks requests produced by [`crate::RequestSigner`].
///
/// It rebuilds the string to sign from the transmitted request with the same
/// canonicalization as the signer, so any change to the body or to a signed
/// header after signing makes verification fail.
#[derive(Debug, Clone)]
pub struct Verifier {
    credential: Credential,
    profile: SigningProfile,
}

impl Verifier {
    /// Create a verifier for requests signed with `credential`.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            profile: SigningProfile::current(),
        }
    }

    /// Use another signing profile.
    pub fn with_profile(mut self, profile: SigningProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Verify a frozen signed request.
    pub fn verify_request(&self, req: &SignedRequest) -> Result<bool> {
        self.verify(req.method(), req.uri(), req.headers(), req.body())
    }

    /// Verify a request given as its parts.
    ///
    /// Returns `Ok(false)` for any mismatch or malformed header. Errors are
    /// only returned when the HMAC primitive itself fails.
    pub fn verify(
        &self,
        method: &Method,
        uri: &Uri,
        headers: &HeaderMap,
        body: &[u8],
    ) -> Result<bool> {
        let content_hash = headers
            .get(self.profile.content_hash_header())
            .and_then(|v| v.to_str().ok());
        if content_hash != Some(base64_sha256(body).as_str()) {
            debug!("content hash does not match the request body");
            return Ok(false);
        }

        let Some(auth) = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_authorization)
        else {
            debug!("authorization header is missing or malformed");
            return Ok(false);
        };
        if auth.credential != self.credential.id() {
            debug!("authorization is for another credential");
            return Ok(false);
        }
        if auth.signed_headers != self.profile.signed_headers_list() {
            debug!("authorization signs an unexpected header list");
            return Ok(false);
        }

        let Ok(string_to_sign) = string_to_sign_of(method, uri, headers, &self.profile) else {
            return Ok(false);
        };

        verify_base64_hmac_sha256(
            self.credential.secret(),
            string_to_sign.as_bytes(),
            auth.signature,
        )
    }
}

struct Authorization<'a> {
    credential: &'a str,
    signed_headers: &'a str,
    signature: &'a str,
}

/// Parse `HMAC-SHA256 Credential=<id>, SignedHeaders=<list>, Signature=<sig>`.
fn parse_authorization(value: &str) -> Option<Authorization<'_>> {
    let params = value.strip_prefix(HMAC_SHA256_SCHEME)?.strip_prefix(' ')?;

    let (mut credential, mut signed_headers, mut signature) = (None, None, None);
    for param in params.split(',') {
        let (k, v) = param.trim().split_once('=')?;
        match k {
            "Credential" => credential = Some(v),
            "SignedHeaders" => signed_headers = Some(v),
            "Signature" => signature = Some(v),
            _ => return None,
        }
    }

    Some(Authorization {
        credential: credential?,
        signed_headers: signed_headers?,
        signature: signature?,
    })
}
