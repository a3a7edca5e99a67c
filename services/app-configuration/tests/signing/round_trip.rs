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

use super::{credential, sign, signer, signer_with_profile};
use azsign_app_configuration::{
    Credential, SigningProfile, Verifier, X_MS_CONTENT_SHA256, X_MS_DATE,
};
use azsign_core::Result;
use http::{header, HeaderName, Method};
use pretty_assertions::assert_eq;
use rand::distributions::{Alphanumeric, DistString};
use rand::{thread_rng, Rng, RngCore};

fn random_query(rng: &mut impl Rng) -> String {
    let pairs = rng.gen_range(0..4);
    let mut query = form_urlencoded::Serializer::new(String::new());
    for _ in 0..pairs {
        let key_len = rng.gen_range(1..8);
        let value_len = rng.gen_range(0..16);
        let key = Alphanumeric.sample_string(rng, key_len);
        let value = Alphanumeric.sample_string(rng, value_len);
        query.append_pair(&key, &value);
    }
    query.append_pair("api-version", "1.0");
    query.finish()
}

#[tokio::test]
async fn test_random_requests_verify() -> Result<()> {
    let mut rng = thread_rng();
    let methods = [
        Method::GET,
        Method::PUT,
        Method::POST,
        Method::DELETE,
        Method::PATCH,
        Method::HEAD,
    ];

    for _ in 0..64 {
        let secret_len = rng.gen_range(1..64);
        let mut secret = vec![0; secret_len];
        rng.fill_bytes(&mut secret);
        let id = Alphanumeric.sample_string(&mut rng, 12);
        let cred = Credential::new("https://random.azconfig.io", &id, secret)?;

        let path_len = rng.gen_range(1..24);
        let path = Alphanumeric.sample_string(&mut rng, path_len);
        let query = random_query(&mut rng);
        let body_len = rng.gen_range(0..256);
        let mut body = vec![0; body_len];
        rng.fill_bytes(&mut body);
        let method = methods[rng.gen_range(0..methods.len())].clone();
        let profile = if rng.gen_bool(0.5) {
            SigningProfile::legacy()
        } else {
            SigningProfile::current()
        };

        let req = sign(
            &signer_with_profile(cred.clone(), profile.clone()),
            method,
            &format!("https://random.azconfig.io/kv/{path}?{query}"),
            body,
        )
        .await?;

        assert!(
            Verifier::new(cred).with_profile(profile).verify_request(&req)?,
            "{} {} must verify",
            req.method(),
            req.uri()
        );
    }

    Ok(())
}

#[tokio::test]
async fn test_legacy_profile_round_trip() -> Result<()> {
    let req = sign(
        &signer_with_profile(credential(), SigningProfile::legacy()),
        Method::PUT,
        "https://demo.azconfig.io/kv/color?label=prod",
        "blue",
    )
    .await?;

    assert!(req.header_str(header::DATE).is_some_and(|v| v.ends_with("GMT")));
    assert!(req.header_str(X_MS_DATE).is_none());
    assert!(req
        .header_str(header::AUTHORIZATION)
        .is_some_and(|v| v.contains("SignedHeaders=host;date;x-ms-content-sha256,")));

    assert!(Verifier::new(credential())
        .with_profile(SigningProfile::legacy())
        .verify_request(&req)?);
    assert!(!Verifier::new(credential()).verify_request(&req)?);
    Ok(())
}

#[tokio::test]
async fn test_custom_profile_round_trip() -> Result<()> {
    let profile = SigningProfile::new(
        HeaderName::from_static("x-custom-date"),
        HeaderName::from_static("x-custom-sha256"),
    );
    let req = sign(
        &signer_with_profile(credential(), profile.clone()),
        Method::GET,
        "https://demo.azconfig.io/kv?api-version=1.0",
        "",
    )
    .await?;

    assert!(req.header_str("x-custom-date").is_some());
    assert_eq!(
        req.header_str("x-custom-sha256"),
        Some("47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=")
    );
    assert!(Verifier::new(credential())
        .with_profile(profile)
        .verify_request(&req)?);
    Ok(())
}

#[tokio::test]
async fn test_connection_string_signing_headers() -> Result<()> {
    let req = sign(
        &signer(credential()),
        Method::GET,
        "https://demo.azconfig.io/kv?key=*&api-version=1.0",
        "",
    )
    .await?;

    assert_eq!(req.header_str(header::HOST), Some("demo.azconfig.io"));
    assert_eq!(
        req.header_str(X_MS_CONTENT_SHA256),
        Some("47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=")
    );
    assert!(req.header_str(X_MS_DATE).is_some_and(|v| v.ends_with("GMT")));

    let auth = req
        .header_str(header::AUTHORIZATION)
        .expect("authorization must be set");
    assert!(auth.starts_with(
        "HMAC-SHA256 Credential=key-id, SignedHeaders=host;x-ms-date;x-ms-content-sha256, Signature="
    ));
    Ok(())
}

#[tokio::test]
async fn test_other_secret_does_not_verify() -> Result<()> {
    let req = sign(
        &signer(credential()),
        Method::PUT,
        "https://demo.azconfig.io/kv/color",
        "blue",
    )
    .await?;

    let other = Credential::new("https://demo.azconfig.io", "key-id", b"another secret".to_vec())?;
    assert!(!Verifier::new(other).verify_request(&req)?);
    assert!(Verifier::new(credential()).verify_request(&req)?);
    Ok(())
}
