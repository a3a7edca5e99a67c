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

//! Utility functions and types.

use std::fmt::Debug;
use std::fmt::Formatter;

/// Redact keeps sensitive values out of `Debug` output.
///
/// Text values shorter than 12 characters are printed as `***`. Longer ones keep
/// their first and last three characters so different values can still be told
/// apart in logs. Raw secret bytes never show anything except their length.
pub enum Redact<'a> {
    /// A textual value such as a key id.
    Text(&'a str),
    /// Raw secret material.
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact::Text(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact::Text(value)
    }
}

impl<'a> From<&'a [u8]> for Redact<'a> {
    fn from(value: &'a [u8]) -> Self {
        Redact::Bytes(value)
    }
}

impl<'a> From<&'a Vec<u8>> for Redact<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        Redact::Bytes(value)
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Redact::Bytes(bs) if bs.is_empty() => f.write_str("EMPTY"),
            Redact::Bytes(bs) => write!(f, "<{} bytes>", bs.len()),
            Redact::Text(s) if s.is_empty() => f.write_str("EMPTY"),
            // Don't slice in the middle of a multi-byte character.
            Redact::Text(s) if s.len() < 12 || !s.is_ascii() => f.write_str("***"),
            Redact::Text(s) => write!(f, "{}***{}", &s[..3], &s[s.len() - 3..]),
        }
    }
}
