//! Pagination module
//!
//! Supports the Graph API's continuation-link pagination.
//!
//! # Overview
//!
//! Collection endpoints return a page of items plus an optional
//! `paging.next` URL. [`Paginator`] exposes the whole result set as one lazy
//! sequence: it follows continuation links on demand, re-attaches the access
//! token on every hop and stops at an optional item limit.

mod paginator;
mod types;

pub use paginator::{Paginator, PAGE_SIZE_PARAM};
pub use types::{continuation_request, parse_continuation, Cursor, CursorState, Page};

#[cfg(test)]
mod tests;
