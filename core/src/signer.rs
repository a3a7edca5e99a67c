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

use crate::{Context, Error, ProvideCredential, Result, SignRequest, SignedRequest, SigningCredential};
use bytes::Bytes;
use http_body_util::BodyExt;
use std::sync::{Arc, Mutex};

/// Signer is the main struct used to sign the request.
///
/// The credential returned by the provider is cached and only reloaded when it
/// stops being valid. Signing itself holds no other state, so a single signer
/// can be cloned and used from many tasks at once.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// The context this signer was built with.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    async fn load_credential(&self) -> Result<Option<K>> {
        let cred = self.credential.lock().expect("lock poisoned").clone();
        if cred.is_valid() {
            return Ok(cred);
        }

        let cred = self.loader.provide_credential(&self.ctx).await?;
        *self.credential.lock().expect("lock poisoned") = cred.clone();
        Ok(cred)
    }

    /// Sign the request headers in place.
    ///
    /// `body` must be the exact bytes that will be sent with `req`.
    pub async fn sign(&self, req: &mut http::request::Parts, body: &[u8]) -> Result<()> {
        let cred = self.load_credential().await?;

        self.builder
            .sign_request(&self.ctx, req, body, cred.as_ref())
            .await
    }

    /// Sign a fully buffered request and freeze it.
    pub async fn sign_request(&self, req: http::Request<Bytes>) -> Result<SignedRequest> {
        let (mut parts, body) = req.into_parts();
        self.sign(&mut parts, &body).await?;

        Ok(SignedRequest::new(http::Request::from_parts(parts, body)))
    }

    /// Buffer a streaming body once, then sign the request and freeze it.
    ///
    /// The content digest needs every byte of the body, so the whole body is
    /// collected in memory before signing.
    pub async fn sign_body<B>(&self, req: http::Request<B>) -> Result<SignedRequest>
    where
        B: http_body::Body,
        B::Error: std::error::Error + Send + Sync + 'static,
    {
        let (parts, body) = req.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| Error::request_invalid("failed to buffer request body").with_source(e))?
            .to_bytes();

        self.sign_request(http::Request::from_parts(parts, body))
            .await
    }
}
