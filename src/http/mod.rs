//! HTTP client module
//!
//! Provides the request/response engine behind every API call.
//!
//! # Features
//!
//! - **Authentication**: access token attached to every request
//! - **Error Classification**: Graph error envelopes mapped to typed errors
//! - **Rate-Limit Retries**: bounded retries honouring `Retry-After`
//! - **Throttling**: optional client-side token bucket using governor
//! - **Uploads**: multipart file submission

mod client;
mod envelope;
mod retry;
mod throttle;
mod upload;

pub use client::{ApiRequest, ThreatExchangeClient, ACCESS_TOKEN_PARAM};
pub use envelope::{interpret_body, ErrorEnvelope};
pub use retry::{parse_retry_after, RetryPolicy, DEFAULT_RETRY_AFTER_SECS};
pub use throttle::{Throttle, ThrottleConfig};
pub use upload::{FileUpload, FILE_FIELD};
