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

use crate::constants::AZURE_APPCONFIG_CONNECTION_STRING;
use crate::Credential;
use async_trait::async_trait;
use azsign_core::{Context, ProvideCredential, Result};
use log::debug;

/// EnvCredentialProvider loads the connection string from the environment.
///
/// Reads `AZURE_APPCONFIG_CONNECTION_STRING` by default. An unset or empty
/// variable yields `None`. A set but malformed one is an error.
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    var: String,
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvCredentialProvider {
    /// Create a new provider reading `AZURE_APPCONFIG_CONNECTION_STRING`.
    pub fn new() -> Self {
        Self {
            var: AZURE_APPCONFIG_CONNECTION_STRING.to_string(),
        }
    }

    /// Read the connection string from another variable.
    pub fn with_var(mut self, var: impl Into<String>) -> Self {
        self.var = var.into();
        self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(conn_str) = ctx.env_var(&self.var).filter(|v| !v.trim().is_empty()) else {
            debug!("env {} is not set", self.var);
            return Ok(None);
        };

        Credential::from_connection_string(&conn_str).map(Some)
    }
}
