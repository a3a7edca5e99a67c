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
use azsign_core::{Context, Error, FetchPage, Page, PageWalker, ProvideCredential, Result, Signer};
use bytes::Bytes;
use futures::stream::BoxStream;
use http::uri::{Authority, Scheme};
use http::{header, Method, StatusCode, Uri};
use log::{debug, warn};

use crate::constants::*;
use crate::model::{KeyValue, KeyValueFilter, KeyValuePage};
use crate::sign_request::string_to_sign_of;
use crate::{Credential, RequestSigner, SigningProfile, StaticCredentialProvider};

/// Name and version of this crate, sent as `User-Agent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdkInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl SdkInfo {
    /// `name/version`
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

/// SdkInfo of this build.
pub const SDK_INFO: SdkInfo = SdkInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

/// ConfigurationClient lists key-values from a configuration store.
///
/// Requests go through [`Context::http_send`] and every page request, first or
/// continuation, is signed right before it is sent.
#[derive(Debug, Clone)]
pub struct ConfigurationClient {
    walker: PageWalker<KeyValuePages>,
}

impl ConfigurationClient {
    /// Create a client for the store at `endpoint`.
    ///
    /// `provider` is asked for credentials whenever the cached one is missing.
    pub fn new(
        ctx: Context,
        endpoint: &str,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Result<Self> {
        Self::with_profile(ctx, endpoint, provider, SigningProfile::current())
    }

    /// Same as [`ConfigurationClient::new`] with another signing profile.
    pub fn with_profile(
        ctx: Context,
        endpoint: &str,
        provider: impl ProvideCredential<Credential = Credential>,
        profile: SigningProfile,
    ) -> Result<Self> {
        let endpoint: Uri = endpoint
            .parse()
            .map_err(|e| Error::config_invalid(format!("invalid endpoint {endpoint}")).with_source(e))?;
        let (Some(scheme), Some(authority)) = (endpoint.scheme(), endpoint.authority()) else {
            return Err(Error::config_invalid(format!(
                "endpoint {endpoint} must have scheme and host"
            )));
        };

        let signer = Signer::new(
            ctx,
            provider,
            RequestSigner::new().with_profile(profile.clone()),
        );

        Ok(Self {
            walker: PageWalker::new(KeyValuePages {
                scheme: scheme.clone(),
                authority: authority.clone(),
                signer,
                profile,
            }),
        })
    }

    /// Create a client from a connection string.
    pub fn from_connection_string(ctx: Context, conn_str: &str) -> Result<Self> {
        let credential = Credential::from_connection_string(conn_str)?;
        let endpoint = credential.endpoint().to_string();

        Self::new(ctx, &endpoint, StaticCredentialProvider::new(credential))
    }

    /// List all key-values matching `filter`.
    ///
    /// The returned stream is lazy. Pages are only requested while it is
    /// polled, and it ends with an error once a page fails to load.
    pub fn list_key_values(&self, filter: KeyValueFilter) -> BoxStream<'static, Result<KeyValue>> {
        self.walker.walk(filter)
    }

    /// List key-values matching `filter` page by page.
    pub fn list_key_value_pages(
        &self,
        filter: KeyValueFilter,
    ) -> BoxStream<'static, Result<Page<KeyValue>>> {
        self.walker.pages(filter)
    }
}

#[derive(Debug)]
struct KeyValuePages {
    scheme: Scheme,
    authority: Authority,
    signer: Signer<Credential>,
    profile: SigningProfile,
}

impl KeyValuePages {
    /// Resolve a continuation link against the store endpoint.
    ///
    /// Links pointing at another store, or at the same store over another
    /// scheme, are refused so that a signed request never leaves the
    /// configured endpoint.
    fn resolve(&self, link: &str) -> Result<Uri> {
        if link.contains("://") {
            let uri: Uri = link.parse().map_err(|e| {
                Error::request_invalid(format!("invalid next link {link}")).with_source(e)
            })?;
            if uri.scheme() != Some(&self.scheme) || uri.authority() != Some(&self.authority) {
                return Err(Error::request_invalid(format!(
                    "next link {link} points outside of {}",
                    self.authority
                )));
            }
            return Ok(uri);
        }

        let path_and_query = if link.starts_with('/') {
            link.to_string()
        } else {
            format!("/{link}")
        };
        Ok(Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(path_and_query)
            .build()?)
    }

    async fn fetch(&self, uri: Uri) -> Result<Page<KeyValue>> {
        let req = http::Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, KV_JSON_CONTENT_TYPE)
            .header(header::USER_AGENT, SDK_INFO.user_agent())
            .body(Bytes::new())?;

        let req = self.signer.sign_request(req).await?;
        let signed_host = req.header_str(header::HOST).unwrap_or_default();
        if !signed_host.eq_ignore_ascii_case(self.authority.host()) {
            return Err(Error::config_invalid(format!(
                "credential is signed for host {signed_host} but requests go to {}",
                self.authority.host()
            )));
        }
        let string_to_sign = string_to_sign_of(req.method(), req.uri(), req.headers(), &self.profile)?;
        debug!("sending list request: {}", req.uri());

        let resp = self.signer.context().http_send(req.into_inner()).await?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("request was rejected by service, string to sign: {string_to_sign:?}");
            return Err(Error::credential_denied(format!(
                "service rejected signature: {}",
                String::from_utf8_lossy(resp.body())
            )));
        }
        if !status.is_success() {
            return Err(Error::fetch_failed(format!(
                "list key values failed with status {status}: {}",
                String::from_utf8_lossy(resp.body())
            )));
        }

        let page: KeyValuePage = serde_json::from_slice(resp.body())
            .map_err(|e| Error::fetch_failed("failed to parse key values page").with_source(e))?;

        Ok(Page {
            items: page.items,
            next_link: page.next_link,
        })
    }
}

#[async_trait]
impl FetchPage for KeyValuePages {
    type Query = KeyValueFilter;
    type Item = KeyValue;

    async fn fetch_first(&self, filter: &KeyValueFilter) -> Result<Page<KeyValue>> {
        let uri = Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(format!("{KEY_VALUE_PATH}?{}", list_query(filter)))
            .build()?;

        self.fetch(uri).await
    }

    async fn fetch_next(&self, link: &str) -> Result<Page<KeyValue>> {
        let uri = self.resolve(link)?;
        self.fetch(uri).await
    }
}

fn list_query(filter: &KeyValueFilter) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(key) = &filter.key {
        query.append_pair("key", key);
    }
    if let Some(label) = &filter.label {
        query.append_pair("label", label);
    }
    if !filter.select.is_empty() {
        query.append_pair("$select", &filter.select.join(","));
    }
    query.append_pair("api-version", API_VERSION);
    query.finish()
}
