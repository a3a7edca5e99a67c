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

use super::{credential, sign, signer};
use azsign_app_configuration::{Verifier, X_MS_CONTENT_SHA256, X_MS_DATE};
use azsign_core::Result;
use http::{header, HeaderValue, Method, Uri};

async fn signed_put() -> Result<azsign_core::SignedRequest> {
    sign(
        &signer(credential()),
        Method::PUT,
        "https://demo.azconfig.io/kv/color?label=prod",
        "blue",
    )
    .await
}

#[tokio::test]
async fn test_tampered_body_fails() -> Result<()> {
    let req = signed_put().await?;
    let verifier = Verifier::new(credential());

    assert!(!verifier.verify(req.method(), req.uri(), req.headers(), b"green")?);
    Ok(())
}

#[tokio::test]
async fn test_any_flipped_body_byte_fails() -> Result<()> {
    let body = br#"{"key":"color","value":"blue"}"#;
    let req = sign(
        &signer(credential()),
        Method::PUT,
        "https://demo.azconfig.io/kv/color",
        body.to_vec(),
    )
    .await?;
    let verifier = Verifier::new(credential());
    assert!(verifier.verify_request(&req)?);

    for i in 0..body.len() {
        let mut tampered = body.to_vec();
        tampered[i] ^= 0x01;

        assert!(
            !verifier.verify(req.method(), req.uri(), req.headers(), &tampered)?,
            "flipping byte {i} must break the signature"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_tampered_headers_fail() -> Result<()> {
    let req = signed_put().await?;
    let verifier = Verifier::new(credential());

    for (name, value) in [
        (header::HOST, "evil.azconfig.io"),
        (X_MS_DATE, "Tue, 01 Mar 2022 08:12:35 GMT"),
        (X_MS_CONTENT_SHA256, "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="),
        (header::AUTHORIZATION, "HMAC-SHA256 Signature=abc"),
    ] {
        let mut headers = req.headers().clone();
        headers.insert(name.clone(), HeaderValue::from_static(value));

        assert!(
            !verifier.verify(req.method(), req.uri(), &headers, req.body())?,
            "changing {name} must break the signature"
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_tampered_request_line_fails() -> Result<()> {
    let req = signed_put().await?;
    let verifier = Verifier::new(credential());

    assert!(!verifier.verify(&Method::POST, req.uri(), req.headers(), req.body())?);

    let uri: Uri = "https://demo.azconfig.io/kv/color?label=dev".parse()?;
    assert!(!verifier.verify(req.method(), &uri, req.headers(), req.body())?);
    Ok(())
}

#[tokio::test]
async fn test_unsigned_headers_are_free() -> Result<()> {
    let req = signed_put().await?;
    let mut headers = req.headers().clone();
    headers.insert(header::USER_AGENT, HeaderValue::from_static("curl/8.0"));

    assert!(Verifier::new(credential()).verify(req.method(), req.uri(), &headers, req.body())?);
    Ok(())
}
