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

//! Core components for signing configuration-store requests and walking paged listings.
//!
//! This crate provides the foundational types and traits shared by the azsign
//! service crates.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for HTTP sending and environment access
//! - **Traits**: Abstract interfaces for credential loading ([`ProvideCredential`]) and request signing ([`SignRequest`])
//! - **Signer**: The orchestrator that loads credentials, signs requests and freezes them into [`SignedRequest`]
//! - **PageWalker**: Lazily follows continuation links and flattens pages into a stream of items
//!
//! ## Example
//!
//! ```no_run
//! use azsign_core::{Context, FetchPage, Page, PageWalker, Result};
//! use futures::TryStreamExt;
//!
//! struct Numbers;
//!
//! #[async_trait::async_trait]
//! impl FetchPage for Numbers {
//!     type Query = ();
//!     type Item = u32;
//!
//!     async fn fetch_first(&self, _: &()) -> Result<Page<u32>> {
//!         Ok(Page::new(vec![1, 2], "page-2"))
//!     }
//!
//!     async fn fetch_next(&self, _link: &str) -> Result<Page<u32>> {
//!         Ok(Page::last(vec![3]))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let items: Vec<u32> = PageWalker::new(Numbers).walk(()).try_collect().await?;
//! assert_eq!(items, vec![1, 2, 3]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, HttpSend, NoopEnv, NoopHttpSend, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};
mod request;
pub use request::{SignedRequest, SigningRequest};
mod signer;
pub use signer::Signer;

mod page;
pub use page::{FetchPage, Page, PageWalker};
