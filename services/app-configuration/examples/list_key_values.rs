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

//! List key-values of a configuration store.
//!
//! ```shell
//! export AZURE_APPCONFIG_CONNECTION_STRING="Endpoint=https://xxx.azconfig.io;Id=xxx;Secret=xxx"
//! cargo run --example list_key_values -- "app/*"
//! ```

use anyhow::{anyhow, Result};
use azsign_app_configuration::{
    ConfigurationClient, KeyValueFilter, AZURE_APPCONFIG_CONNECTION_STRING,
};
use azsign_core::{Context, OsEnv};
use azsign_http_send_reqwest::ReqwestHttpSend;
use futures::TryStreamExt;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let conn_str = env::var(AZURE_APPCONFIG_CONNECTION_STRING)
        .map_err(|_| anyhow!("{AZURE_APPCONFIG_CONNECTION_STRING} must be set"))?;
    let ctx = Context::new()
        .with_env(OsEnv)
        .with_http_send(ReqwestHttpSend::default());
    let client = ConfigurationClient::from_connection_string(ctx, &conn_str)?;

    let mut filter = KeyValueFilter::new();
    if let Some(key) = env::args().nth(1) {
        filter = filter.with_key(key);
    }

    let mut stream = client.list_key_values(filter);
    while let Some(kv) = stream.try_next().await? {
        println!(
            "{}\t{}\t{}",
            kv.key,
            kv.label.as_deref().unwrap_or("-"),
            kv.value.as_deref().unwrap_or("")
        );
    }

    Ok(())
}
