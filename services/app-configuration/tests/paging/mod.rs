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
use azsign_app_configuration::{Credential, SigningProfile, Verifier};
use azsign_core::{HttpSend, Result};
use bytes::Bytes;
use http::StatusCode;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const CONNECTION_STRING: &str =
    "Endpoint=https://demo.azconfig.io;Id=key-id;Secret=c2VjcmV0";

pub fn credential() -> Credential {
    Credential::from_connection_string(CONNECTION_STRING).expect("credential must be valid")
}

/// A request seen by [`MockStore`].
#[derive(Debug, Clone)]
pub struct Seen {
    pub path_and_query: String,
    pub user_agent: Option<String>,
    pub host: Option<String>,
    pub verified: bool,
}

/// MockStore answers `GET` requests from canned responses keyed by path and query.
///
/// Every request is checked against the store credential before it is answered.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    responses: Arc<HashMap<String, (StatusCode, String)>>,
    profile: SigningProfile,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl MockStore {
    pub fn new(responses: impl IntoIterator<Item = (&'static str, StatusCode, String)>) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        Self {
            responses: Arc::new(
                responses
                    .into_iter()
                    .map(|(k, status, body)| (k.to_string(), (status, body)))
                    .collect(),
            ),
            profile: SigningProfile::current(),
            seen: Arc::default(),
        }
    }

    /// Verify incoming requests with `profile`.
    pub fn with_profile(mut self, profile: SigningProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    pub fn seen_paths(&self) -> Vec<String> {
        self.seen()
            .into_iter()
            .map(|v| v.path_and_query)
            .collect()
    }
}

#[async_trait]
impl HttpSend for MockStore {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|v| v.as_str().to_string())
            .unwrap_or_default();
        let verified = Verifier::new(credential())
            .with_profile(self.profile.clone())
            .verify(req.method(), req.uri(), req.headers(), req.body())?;

        self.seen.lock().unwrap().push(Seen {
            path_and_query: path_and_query.clone(),
            user_agent: req
                .headers()
                .get(http::header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string()),
            host: req
                .headers()
                .get(http::header::HOST)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string()),
            verified,
        });

        let (status, body) = match self.responses.get(&path_and_query) {
            Some((status, body)) => (*status, body.clone()),
            None => (StatusCode::NOT_FOUND, String::new()),
        };
        Ok(http::Response::builder()
            .status(status)
            .body(Bytes::from(body))?)
    }
}

/// Build a listing page body.
pub fn page(keys: &[&str], next_link: Option<&str>) -> String {
    let items: Vec<Value> = keys
        .iter()
        .map(|k| json!({"key": k, "label": null, "value": format!("value of {k}")}))
        .collect();

    let mut body = json!({ "items": items });
    if let Some(link) = next_link {
        body["@nextLink"] = json!(link);
    }
    body.to_string()
}
