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

use async_trait::async_trait;
use azsign_core::hash::{base64_hmac_sha256, base64_sha256};
use azsign_core::time::{format_http_date, now, DateTime};
use azsign_core::{Context, Error, Result, SignRequest, SigningCredential, SigningRequest};
use http::request::Parts;
use http::{header, HeaderMap, HeaderValue, Method, Uri};
use log::debug;

use crate::constants::*;
use crate::{Credential, SigningProfile};

/// RequestSigner implements the configuration store HMAC-SHA256 scheme.
///
/// For every request it:
///
/// 1. sets the date header to the current time unless the caller already did,
/// 2. forces `host` to the credential's endpoint host,
/// 3. forces the content hash header to the base64 SHA-256 of the body,
/// 4. builds the string to sign from method, path and query, and the signed headers,
/// 5. signs it with HMAC-SHA256 using the decoded secret,
/// 6. writes `Authorization: HMAC-SHA256 Credential=.., SignedHeaders=.., Signature=..`.
///
/// The date and signature are specific to one attempt. Retries must go
/// through the signer again.
#[derive(Debug, Default)]
pub struct RequestSigner {
    profile: SigningProfile,
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer using [`SigningProfile::current`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another signing profile.
    pub fn with_profile(mut self, profile: SigningProfile) -> Self {
        self.profile = profile;
        self
    }

    /// The profile used by this signer.
    pub fn profile(&self) -> &SigningProfile {
        &self.profile
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        body: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Err(Error::credential_invalid("credential is required"));
        };
        if cred.secret().is_empty() {
            return Err(Error::credential_invalid("credential secret is empty"));
        }
        if !cred.is_valid() {
            return Err(Error::credential_invalid(
                "credential id and endpoint host must not be empty",
            ));
        }

        let mut ctx = SigningRequest::build(req)?;

        let date_header = self.profile.date_header().clone();
        if !ctx.headers.contains_key(&date_header) {
            let date = format_http_date(self.time.unwrap_or_else(now));
            ctx.header_force(date_header, &date)?;
        }
        ctx.header_force(header::HOST, cred.host())?;
        ctx.header_force(
            self.profile.content_hash_header().clone(),
            &base64_sha256(body),
        )?;

        let values = self
            .profile
            .signed_header_names()
            .iter()
            .map(|name| ctx.header_get_or_default(name))
            .collect::<Result<Vec<_>>>()?;
        let string_to_sign = string_to_sign(&ctx.method, &ctx.path_and_query(), &values);
        debug!("string to sign: {}", &string_to_sign);

        let signature = base64_hmac_sha256(cred.secret(), string_to_sign.as_bytes())?;

        ctx.headers.insert(header::AUTHORIZATION, {
            let mut value = HeaderValue::from_str(&authorization(
                cred.id(),
                &self.profile.signed_headers_list(),
                &signature,
            ))?;
            value.set_sensitive(true);
            value
        });

        ctx.apply(req)
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// UPPERCASE(Method) + "\n" +
/// PathAndQuery + "\n" +
/// Host + ";" + Date + ";" + ContentHash
/// ```
pub fn string_to_sign(method: &Method, path_and_query: &str, signed_values: &[&str]) -> String {
    let method = method.as_str().to_ascii_uppercase();
    let values = signed_values.join(";");

    let mut s = String::with_capacity(method.len() + path_and_query.len() + values.len() + 2);
    s.push_str(&method);
    s.push('\n');
    s.push_str(path_and_query);
    s.push('\n');
    s.push_str(&values);
    s
}

/// Rebuild the string to sign from a request as it goes over the wire.
///
/// Missing signed headers contribute an empty value, exactly like they do
/// while signing.
pub fn string_to_sign_of(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    profile: &SigningProfile,
) -> Result<String> {
    let path_and_query = uri.path_and_query().map(|v| v.as_str()).unwrap_or("/");

    let mut values = Vec::with_capacity(3);
    for name in profile.signed_header_names() {
        let value = match headers.get(&name) {
            Some(v) => v.to_str()?,
            None => "",
        };
        values.push(value);
    }

    Ok(string_to_sign(method, path_and_query, &values))
}

fn authorization(id: &str, signed_headers: &str, signature: &str) -> String {
    format!("{HMAC_SHA256_SCHEME} Credential={id}, SignedHeaders={signed_headers}, Signature={signature}")
}
