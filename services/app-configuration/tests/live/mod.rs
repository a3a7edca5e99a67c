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

use std::env;

use anyhow::Result;
use azsign_app_configuration::{ConfigurationClient, DefaultCredentialProvider, KeyValueFilter};
use azsign_core::{Context, OsEnv};
use azsign_http_send_reqwest::ReqwestHttpSend;
use futures::TryStreamExt;
use log::{debug, warn};

fn init_live_test() -> Option<Context> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("AZSIGN_APP_CONFIGURATION_TEST").unwrap_or_default() != "on" {
        return None;
    }

    Some(
        Context::new()
            .with_env(OsEnv)
            .with_http_send(ReqwestHttpSend::default()),
    )
}

#[tokio::test]
async fn test_list_key_values() -> Result<()> {
    let Some(ctx) = init_live_test() else {
        warn!("AZSIGN_APP_CONFIGURATION_TEST is not set, skipped");
        return Ok(());
    };

    let conn_str = env::var("AZSIGN_APP_CONFIGURATION_CONNECTION_STRING")
        .expect("env AZSIGN_APP_CONFIGURATION_CONNECTION_STRING must set");
    let client = ConfigurationClient::from_connection_string(ctx, &conn_str)?;

    let items: Vec<_> = client
        .list_key_values(KeyValueFilter::new())
        .try_collect()
        .await?;

    debug!("listed {} key values", items.len());
    Ok(())
}

#[tokio::test]
async fn test_list_key_values_with_wrong_secret() -> Result<()> {
    let Some(ctx) = init_live_test() else {
        warn!("AZSIGN_APP_CONFIGURATION_TEST is not set, skipped");
        return Ok(());
    };

    let endpoint = env::var("AZSIGN_APP_CONFIGURATION_ENDPOINT")
        .expect("env AZSIGN_APP_CONFIGURATION_ENDPOINT must set");
    let provider = DefaultCredentialProvider::new().with_connection_string(&format!(
        "Endpoint={endpoint};Id=not-a-key;Secret=bm90LWEtc2VjcmV0"
    ))?;
    let client = ConfigurationClient::new(ctx, &endpoint, provider)?;

    let err = client
        .list_key_values(KeyValueFilter::new())
        .try_collect::<Vec<_>>()
        .await
        .expect_err("listing with a wrong secret must fail");

    assert!(err.is_credential_error(), "unexpected error: {err}");
    Ok(())
}
