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

use http::HeaderName;

// Headers used by the configuration store HMAC scheme.
pub const X_MS_DATE: HeaderName = HeaderName::from_static("x-ms-date");
pub const X_MS_CONTENT_SHA256: HeaderName = HeaderName::from_static("x-ms-content-sha256");

pub const HMAC_SHA256_SCHEME: &str = "HMAC-SHA256";

// Connection string keys, matched case-insensitively.
pub const CONNECTION_STRING_ENDPOINT: &str = "endpoint";
pub const CONNECTION_STRING_ID: &str = "id";
pub const CONNECTION_STRING_SECRET: &str = "secret";

// Env values used by the configuration store.
pub const AZURE_APPCONFIG_CONNECTION_STRING: &str = "AZURE_APPCONFIG_CONNECTION_STRING";

// REST surface used for listing.
pub const API_VERSION: &str = "1.0";
pub const KEY_VALUE_PATH: &str = "/kv";
pub const KV_JSON_CONTENT_TYPE: &str = "application/vnd.microsoft.appconfig.kv+json";
