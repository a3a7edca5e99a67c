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

mod round_trip;
mod tamper;

use azsign_app_configuration::{Credential, RequestSigner, SigningProfile};
use azsign_core::{Context, Result, SignedRequest, Signer};
use bytes::Bytes;
use http::Request;

pub const CONNECTION_STRING: &str =
    "Endpoint=https://demo.azconfig.io;Id=key-id;Secret=c2VjcmV0";

pub fn credential() -> Credential {
    Credential::from_connection_string(CONNECTION_STRING).expect("credential must be valid")
}

pub fn signer(cred: Credential) -> Signer<Credential> {
    signer_with_profile(cred, SigningProfile::current())
}

pub fn signer_with_profile(cred: Credential, profile: SigningProfile) -> Signer<Credential> {
    let _ = env_logger::builder().is_test(true).try_init();

    Signer::new(
        Context::new(),
        azsign_app_configuration::StaticCredentialProvider::new(cred),
        RequestSigner::new().with_profile(profile),
    )
}

pub async fn sign(
    signer: &Signer<Credential>,
    method: http::Method,
    uri: &str,
    body: impl Into<Bytes>,
) -> Result<SignedRequest> {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(body.into())?;

    signer.sign_request(req).await
}
