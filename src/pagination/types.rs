//! Pagination types
//!
//! A collection response looks like
//! `{"data": [...], "paging": {"next": "<absolute URL>"}}`. The absence of
//! `paging.next` is the only end-of-results signal the API sends.

use crate::error::Result;
use crate::http::ApiRequest;
use crate::types::{ParamValue, Params};
use serde_json::Value;
use url::{Position, Url};

/// One page of a collection response
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in server order
    pub data: Vec<T>,
    /// Continuation URL for the next page
    pub next_url: Option<String>,
}

impl<T> Page<T> {
    /// Parse a page body, mapping each item through `transform`
    ///
    /// Never fails: a missing or mistyped `data` gives an empty page and a
    /// missing, empty or non-string `paging.next` ends the traversal.
    pub fn from_body(body: Value, transform: impl Fn(Value) -> T) -> Self {
        let mut body = body;
        let next_url = body
            .get("paging")
            .and_then(|paging| paging.get("next"))
            .and_then(Value::as_str)
            .filter(|next| !next.is_empty())
            .map(str::to_string);

        let data = match body.get_mut("data").map(Value::take) {
            Some(Value::Array(items)) => items.into_iter().map(transform).collect(),
            _ => Vec::new(),
        };

        Self { data, next_url }
    }

    /// Whether a continuation reference is present
    pub fn has_next(&self) -> bool {
        self.next_url.is_some()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Page<Value> {
    /// Parse a page body keeping raw items
    pub fn from_value(body: Value) -> Self {
        Self::from_body(body, |item| item)
    }
}

/// Where the next fetch goes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cursor {
    /// Nothing fetched yet: use the original endpoint and params
    #[default]
    Start,
    /// Follow a server-issued continuation URL
    Next(String),
    /// No more pages
    End,
}

/// Traversal state for one lazy sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorState {
    /// Next fetch position
    pub cursor: Cursor,
    /// Items handed to the consumer so far
    pub yielded: usize,
    /// Pages fetched so far
    pub pages: usize,
    /// Stop after this many items
    pub limit: Option<usize>,
}

impl CursorState {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    /// Whether the caller's item limit has been reached
    pub fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.yielded >= limit)
    }

    /// Whether no further page will be fetched
    pub fn is_end(&self) -> bool {
        self.cursor == Cursor::End
    }

    /// Record one item handed out
    pub fn record_item(&mut self) {
        self.yielded += 1;
    }

    /// Record a fetched page and where to go next
    pub fn record_page(&mut self, next_url: Option<String>) {
        self.pages += 1;
        self.cursor = next_url.map_or(Cursor::End, Cursor::Next);
    }

    /// Stop the traversal
    pub fn finish(&mut self) {
        self.cursor = Cursor::End;
    }
}

/// Split a continuation URL into its base and query parameters
///
/// Keys that appear once become scalars; repeated keys keep every value.
/// The base keeps scheme, host, port and path.
pub fn parse_continuation(next_url: &str) -> Result<(String, Params)> {
    let url = Url::parse(next_url)?;
    let base = url[..Position::AfterPath].to_string();

    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for (key, value) in url.query_pairs() {
        match grouped.iter_mut().find(|(k, _)| *k == *key) {
            Some((_, values)) => values.push(value.into_owned()),
            None => grouped.push((key.into_owned(), vec![value.into_owned()])),
        }
    }

    let params = grouped
        .into_iter()
        .map(|(key, values)| (key, ParamValue::from(values)))
        .collect();
    Ok((base, params))
}

/// Build the GET request that follows a continuation URL
pub fn continuation_request(next_url: &str) -> Result<ApiRequest> {
    let (base, params) = parse_continuation(next_url)?;
    Ok(ApiRequest::get(base).with_query(params))
}
