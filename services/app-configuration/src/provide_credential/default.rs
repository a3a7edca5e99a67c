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

use crate::provide_credential::{EnvCredentialProvider, StaticCredentialProvider};
use crate::Credential;
use async_trait::async_trait;
use azsign_core::{Context, ProvideCredential, Result};
use log::debug;
use std::fmt::{self, Debug};

/// DefaultCredentialProvider tries a chain of providers in order.
///
/// The default chain only reads the environment. Providers pushed to the
/// front take priority. The first provider returning a credential wins, and an
/// error from any provider stops the chain: a broken connection string must
/// not be papered over by a fallback.
pub struct DefaultCredentialProvider {
    providers: Vec<Box<dyn ProvideCredential<Credential = Credential>>>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for DefaultCredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultCredentialProvider")
            .field("providers", &self.providers)
            .finish()
    }
}

impl DefaultCredentialProvider {
    /// Create a new `DefaultCredentialProvider` instance.
    pub fn new() -> Self {
        Self {
            providers: vec![Box::new(EnvCredentialProvider::new())],
        }
    }

    /// Add a credential provider to the front of the chain.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use azsign_app_configuration::{DefaultCredentialProvider, StaticCredentialProvider};
    ///
    /// # fn main() -> azsign_core::Result<()> {
    /// let provider = DefaultCredentialProvider::new().push_front(
    ///     StaticCredentialProvider::from_connection_string(
    ///         "Endpoint=https://demo.azconfig.io;Id=key-id;Secret=c2VjcmV0",
    ///     )?,
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn push_front(mut self, provider: impl ProvideCredential<Credential = Credential>) -> Self {
        self.providers.insert(0, Box::new(provider));
        self
    }

    /// Use `conn_str` before falling back to the environment.
    pub fn with_connection_string(self, conn_str: &str) -> Result<Self> {
        Ok(self.push_front(StaticCredentialProvider::from_connection_string(conn_str)?))
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        for provider in &self.providers {
            debug!("trying credential provider: {provider:?}");

            if let Some(cred) = provider.provide_credential(ctx).await? {
                debug!("loaded credential from provider: {provider:?}");
                return Ok(Some(cred));
            }
        }

        Ok(None)
    }
}
