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

//! Continuation based page traversal.
//!
//! A listing endpoint answers with one [`Page`] at a time. Each page may carry
//! a continuation link that points at the next one. [`PageWalker`] follows that
//! chain lazily and flattens it into a single ordered stream of items.

use std::collections::HashSet;
use std::mem;
use std::sync::Arc;

use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt};
use log::debug;

use crate::{Error, ErrorKind, Result};

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in the order the server returned them. May be empty.
    pub items: Vec<T>,
    /// Link to the next page, `None` when this is the last one.
    pub next_link: Option<String>,
}

impl<T> Page<T> {
    /// Create a page that continues at `next_link`.
    pub fn new(items: Vec<T>, next_link: impl Into<String>) -> Self {
        Self {
            items,
            next_link: Some(next_link.into()),
        }
    }

    /// Create the final page of a listing.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_link: None,
        }
    }

    /// The link to follow, if any.
    ///
    /// Services signal the end either by omitting the link or by sending an
    /// empty one. Both are treated the same.
    pub fn continuation(&self) -> Option<&str> {
        self.next_link.as_deref().filter(|v| !v.is_empty())
    }
}

/// FetchPage is the REST layer seen from the walker.
#[async_trait::async_trait]
pub trait FetchPage: Send + Sync + 'static {
    /// Parameters of the initial listing request.
    type Query: Send + Sync + 'static;
    /// Item type carried by pages.
    type Item: Send + 'static;

    /// Fetch the first page for `query`.
    async fn fetch_first(&self, query: &Self::Query) -> Result<Page<Self::Item>>;

    /// Fetch the page behind a continuation link returned by a previous page.
    async fn fetch_next(&self, link: &str) -> Result<Page<Self::Item>>;
}

/// PageWalker turns a [`FetchPage`] into lazy streams of pages or items.
///
/// - Pages are fetched one at a time, only when the consumer asks for more.
/// - Items come out page by page, keeping the order inside each page.
/// - A link that was already followed during the same walk stops the stream
///   with [`ErrorKind::PaginationCycle`] once the page carrying it is drained.
/// - A failed fetch ends the stream with [`ErrorKind::FetchFailed`]. Items that
///   were already yielded stay yielded.
/// - Dropping the stream drops the in-flight fetch, nothing else is issued.
///
/// Every call to [`PageWalker::walk`] starts a fresh traversal from the query.
#[derive(Debug)]
pub struct PageWalker<F> {
    fetcher: Arc<F>,
}

impl<F> Clone for PageWalker<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
        }
    }
}

impl<F: FetchPage> PageWalker<F> {
    /// Create a new walker over `fetcher`.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }

    /// The fetcher used by this walker.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Stream every page of the listing for `query`.
    pub fn pages(&self, query: F::Query) -> BoxStream<'static, Result<Page<F::Item>>> {
        let traversal = Traversal {
            fetcher: self.fetcher.clone(),
            cursor: Cursor::First(query),
            visited: HashSet::new(),
            fetched: 0,
        };

        stream::try_unfold(traversal, Traversal::next_page).boxed()
    }

    /// Stream every item of the listing for `query`.
    pub fn walk(&self, query: F::Query) -> BoxStream<'static, Result<F::Item>> {
        self.pages(query)
            .map_ok(|page| stream::iter(page.items.into_iter().map(Ok)))
            .try_flatten()
            .boxed()
    }
}

enum Cursor<Q> {
    First(Q),
    Next(String),
    Cycle(String),
    Done,
}

struct Traversal<F: FetchPage> {
    fetcher: Arc<F>,
    cursor: Cursor<F::Query>,
    /// Links followed so far. Grows by one entry per page.
    visited: HashSet<String>,
    fetched: usize,
}

impl<F: FetchPage> Traversal<F> {
    async fn next_page(mut self) -> Result<Option<(Page<F::Item>, Self)>> {
        let page = match mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::Done => return Ok(None),
            Cursor::Cycle(link) => {
                return Err(Error::pagination_cycle(format!(
                    "continuation link {link} was already followed after {} pages",
                    self.fetched
                )))
            }
            Cursor::First(query) => self
                .fetcher
                .fetch_first(&query)
                .await
                .map_err(|e| into_fetch_error(e, "failed to fetch first page"))?,
            Cursor::Next(link) => self
                .fetcher
                .fetch_next(&link)
                .await
                .map_err(|e| into_fetch_error(e, &format!("failed to fetch page {link}")))?,
        };
        self.fetched += 1;

        debug!(
            "fetched page {} with {} items, next link: {:?}",
            self.fetched,
            page.items.len(),
            page.continuation()
        );

        self.cursor = match page.continuation() {
            None => Cursor::Done,
            Some(link) if !self.visited.insert(link.to_string()) => Cursor::Cycle(link.to_string()),
            Some(link) => Cursor::Next(link.to_string()),
        };

        Ok(Some((page, self)))
    }
}

/// Classify a fetcher error as a fetch failure unless it already says
/// something more precise.
///
/// Credential, digest, config and cycle errors are fatal and must not turn
/// retryable.
fn into_fetch_error(err: Error, message: &str) -> Error {
    if err.is_credential_error()
        || matches!(
            err.kind(),
            ErrorKind::FetchFailed
                | ErrorKind::DigestUnavailable
                | ErrorKind::ConfigInvalid
                | ErrorKind::PaginationCycle
        )
    {
        return err;
    }

    Error::fetch_failed(message).with_source(err)
}
