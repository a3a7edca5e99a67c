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

//! Signing and listing for configuration store key-values.
//!
//! Requests are signed with the store's HMAC-SHA256 scheme using the `Id` and
//! `Secret` of a connection string. [`ConfigurationClient`] walks the `/kv`
//! listing across `@nextLink` continuations.
//!
//! ```no_run
//! use azsign_app_configuration::{ConfigurationClient, KeyValueFilter};
//! use azsign_core::{Context, Result};
//! use futures::TryStreamExt;
//!
//! # async fn example(ctx: Context) -> Result<()> {
//! let client = ConfigurationClient::from_connection_string(
//!     ctx,
//!     "Endpoint=https://demo.azconfig.io;Id=key-id;Secret=c2VjcmV0",
//! )?;
//!
//! let kvs: Vec<_> = client
//!     .list_key_values(KeyValueFilter::new().with_key("app/*"))
//!     .try_collect()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod constants;

mod credential;
pub use credential::Credential;

mod profile;
pub use profile::SigningProfile;

mod sign_request;
pub use sign_request::{string_to_sign, string_to_sign_of, RequestSigner};

mod verify;
pub use verify::Verifier;

mod provide_credential;
pub use provide_credential::*;

mod model;
pub use model::{KeyValue, KeyValueFilter};

mod client;
pub use client::{ConfigurationClient, SdkInfo, SDK_INFO};

pub use constants::{API_VERSION, AZURE_APPCONFIG_CONNECTION_STRING, X_MS_CONTENT_SHA256, X_MS_DATE};
