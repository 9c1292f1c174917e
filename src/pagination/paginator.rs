//! Lazy, cursor-following result sequence
//!
//! A [`Paginator`] fetches one page at a time and only when the consumer
//! asks for an item past the end of the current page. Dropping it early
//! performs no further requests.

use super::types::{continuation_request, Cursor, CursorState, Page};
use crate::error::Result;
use crate::http::{ApiRequest, ThreatExchangeClient};
use crate::types::Params;
use futures::Stream;
use serde_json::Value;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Query parameter controlling the server page size
pub const PAGE_SIZE_PARAM: &str = "limit";

type Transform<T> = Box<dyn Fn(Value) -> T + Send + Sync>;

/// Pull-based sequence over a paginated collection
pub struct Paginator<'a, T> {
    client: &'a ThreatExchangeClient,
    endpoint: String,
    params: Params,
    transform: Transform<T>,
    state: CursorState,
    buffer: VecDeque<T>,
}

impl<'a, T> Paginator<'a, T> {
    /// Create a paginator; nothing is fetched until [`next`](Self::next)
    ///
    /// `limit` caps the number of items yielded. `Some(0)` yields nothing
    /// and sends no request; pass `None` for an unbounded traversal.
    pub fn new(
        client: &'a ThreatExchangeClient,
        endpoint: impl Into<String>,
        params: Params,
        limit: Option<usize>,
        transform: impl Fn(Value) -> T + Send + Sync + 'static,
    ) -> Self {
        let mut params = params;
        if !params.contains_key(PAGE_SIZE_PARAM) {
            params.insert(PAGE_SIZE_PARAM, client.config().default_page_size);
        }

        Self {
            client,
            endpoint: endpoint.into(),
            params,
            transform: Box::new(transform),
            state: CursorState::new(limit),
            buffer: VecDeque::new(),
        }
    }

    /// Next item, fetching the next page when the current one is used up
    ///
    /// Returns `Ok(None)` once the server stops sending continuation links
    /// or the item limit is reached. After an error the sequence ends.
    pub async fn next(&mut self) -> Result<Option<T>> {
        loop {
            if self.state.limit_reached() {
                self.buffer.clear();
                self.state.finish();
                return Ok(None);
            }
            if let Some(item) = self.buffer.pop_front() {
                self.state.record_item();
                return Ok(Some(item));
            }
            if self.state.is_end() {
                return Ok(None);
            }
            if let Err(err) = self.fetch_page().await {
                self.state.finish();
                return Err(err);
            }
        }
    }

    /// Drain the sequence into a vector
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Adapt into a `futures::Stream`
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> + 'a
    where
        T: 'a,
    {
        futures::stream::try_unfold(self, |mut pager| async move {
            Ok(pager.next().await?.map(|item| (item, pager)))
        })
    }

    /// Items handed out so far
    pub fn items_yielded(&self) -> usize {
        self.state.yielded
    }

    /// Pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.state.pages
    }

    async fn fetch_page(&mut self) -> Result<()> {
        let request = match &self.state.cursor {
            Cursor::Start => ApiRequest::get(self.endpoint.as_str()).with_query(self.params.clone()),
            Cursor::Next(url) => continuation_request(url)?,
            Cursor::End => return Ok(()),
        };

        let body = self.client.execute(&request).await?;
        let page = Page::from_body(body, &*self.transform);
        debug!(
            "Fetched page {} of {} ({} items, more: {})",
            self.state.pages + 1,
            self.endpoint,
            page.len(),
            page.has_next()
        );

        self.buffer.extend(page.data);
        self.state.record_page(page.next_url);

        if let Some(max_pages) = self.client.config().max_pages {
            if self.state.pages >= max_pages && !self.state.is_end() {
                warn!(
                    "Stopping pagination of {} after {} pages (max_pages)",
                    self.endpoint, max_pages
                );
                self.state.finish();
            }
        }
        Ok(())
    }
}

impl<T> std::fmt::Debug for Paginator<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("endpoint", &self.endpoint)
            .field("state", &self.state)
            .field("buffered", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

impl ThreatExchangeClient {
    /// Iterate a collection endpoint, yielding raw JSON items
    pub fn paginate(
        &self,
        endpoint: impl Into<String>,
        params: Params,
        limit: Option<usize>,
    ) -> Paginator<'_, Value> {
        Paginator::new(self, endpoint, params, limit, |item| item)
    }

    /// Iterate a collection endpoint, mapping each item through `transform`
    pub fn paginate_with<T>(
        &self,
        endpoint: impl Into<String>,
        params: Params,
        limit: Option<usize>,
        transform: impl Fn(Value) -> T + Send + Sync + 'static,
    ) -> Paginator<'_, T> {
        Paginator::new(self, endpoint, params, limit, transform)
    }
}
