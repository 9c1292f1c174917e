// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # ThreatExchange Client
//!
//! An async client for the ThreatExchange threat-intelligence Graph API.
//!
//! ## Features
//!
//! - **Typed Failures**: Graph API error envelopes classified into
//!   authentication, rate limit, not found, permission and validation errors
//! - **Rate Limit Recovery**: Bounded retries honouring `Retry-After`
//! - **Lazy Pagination**: Continuation links followed on demand, with an
//!   optional item limit
//! - **Uploads**: Multipart file submission from a path or memory
//! - **Typed Models**: Descriptors, indicators, tags, privacy groups,
//!   members and updates
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use threatexchange_client::{Credentials, Result, ThreatExchangeClient};
//! use threatexchange_client::endpoints::DescriptorSearch;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ThreatExchangeClient::new(Credentials::new("app_id|app_secret"))?;
//!
//!     // Search descriptors, fetching pages as they are consumed
//!     let search = DescriptorSearch::new().text("evil.example.com").limit(100);
//!     let mut descriptors = client.descriptors().search(search);
//!     while let Some(descriptor) = descriptors.next().await? {
//!         println!("{} {:?}", descriptor.id, descriptor.status);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          Endpoints                            │
//! │  descriptors  indicators  tags  privacy_groups  members  ...  │
//! └───────────────────────────────────────────────────────────────┘
//!                 │                               │
//!         ┌───────┴───────┐               ┌───────┴───────┐
//!         │   Paginator   │──────────────▶│   Executor    │
//!         │ continuation  │               │ token, retry, │
//!         │ links, limit  │               │ throttle      │
//!         └───────────────┘               └───────┬───────┘
//!                                                 │
//!                                         ┌───────┴───────┐
//!                                         │   Envelope    │
//!                                         │ classification│
//!                                         └───────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types and classification
pub mod error;

/// Common types and type aliases
pub mod types;

/// Credentials and client configuration
pub mod config;

/// HTTP executor with retry, throttling and uploads
pub mod http;

/// Lazy pagination over continuation links
pub mod pagination;

/// Threat data models
pub mod models;

/// Typed endpoint accessors
pub mod endpoints;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ClientConfig, Credentials};
pub use error::{Error, ErrorKind, Result};
pub use http::{ApiRequest, FileUpload, ThreatExchangeClient};
pub use pagination::Paginator;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
