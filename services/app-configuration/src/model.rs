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

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single key-value stored in the configuration store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyValue {
    pub key: String,
    pub label: Option<String>,
    pub value: Option<String>,
    pub content_type: Option<String>,
    pub etag: Option<String>,
    /// RFC3339 timestamp as sent by the service.
    pub last_modified: Option<String>,
    pub locked: bool,
    pub tags: HashMap<String, String>,
}

/// One page of `GET /kv`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct KeyValuePage {
    pub items: Vec<KeyValue>,
    #[serde(rename = "@nextLink")]
    pub next_link: Option<String>,
}

/// Filter applied to the first listing request.
///
/// `key` and `label` accept the service's own wildcard syntax, e.g. `app/*`.
/// Unset fields are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueFilter {
    pub key: Option<String>,
    pub label: Option<String>,
    /// Only return these fields of every key-value.
    pub select: Vec<String>,
}

impl KeyValueFilter {
    /// Match every key-value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only list keys matching `key`.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Only list key-values carrying `label`.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Restrict the returned fields.
    pub fn with_select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }
}
