//! Response interpretation and error classification
//!
//! The Graph API reports every failure through one envelope shape,
//! `{"error": {"code": .., "message": .., "type": ..}}`, whatever the HTTP
//! status. Its presence at the top level of a body is the failure signal.

use super::retry::parse_retry_after;
use crate::error::{Error, Result};
use reqwest::header::RETRY_AFTER;
use reqwest::Response;
use serde_json::Value;

const RATE_LIMIT_CODES: [i64; 3] = [4, 17, 613];
const AUTHENTICATION_CODES: [i64; 4] = [190, 102, 463, 467];
const NOT_FOUND_CODE: i64 = 803;
const PERMISSION_CODES: [i64; 3] = [10, 200, 294];
const VALIDATION_CODE: i64 = 100;

/// Error envelope returned by the API
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEnvelope {
    /// Numeric Graph API error code (0 when absent)
    pub code: i64,
    /// Human-readable message
    pub message: String,
    /// Full `error` object as received
    pub details: Value,
    /// HTTP status of the response carrying the envelope
    pub status: u16,
}

impl ErrorEnvelope {
    /// Extract the envelope from a response body, if it carries one
    pub fn from_body(body: &Value, status: u16) -> Option<Self> {
        let error = body.as_object()?.get("error")?;
        let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();

        Some(Self {
            code,
            message,
            details: error.clone(),
            status,
        })
    }

    /// Map the envelope to exactly one typed failure
    ///
    /// Rules are checked in order and the first match wins, so a rate-limit
    /// code beats any later bucket. `retry_after` is only used for
    /// rate-limit failures.
    pub fn classify(self, retry_after: u64) -> Error {
        let code = Some(self.code);
        let message = self.message;

        if RATE_LIMIT_CODES.contains(&self.code) || message.to_lowercase().contains("rate limit") {
            return Error::RateLimit {
                message,
                code,
                retry_after,
            };
        }
        if AUTHENTICATION_CODES.contains(&self.code) {
            return Error::Authentication { message, code };
        }
        if self.code == NOT_FOUND_CODE || self.status == 404 {
            return Error::NotFound { message, code };
        }
        if PERMISSION_CODES.contains(&self.code) {
            return Error::Permission { message, code };
        }
        if self.code == VALIDATION_CODE {
            return Error::Validation { message, code };
        }

        Error::Generic {
            message,
            code,
            details: Some(self.details),
        }
    }
}

/// Interpret a raw response body
///
/// Returns the parsed JSON unchanged on success, or the typed failure the
/// body (or its absence) describes.
pub fn interpret_body(status: u16, retry_after: Option<&str>, text: &str) -> Result<Value> {
    let body: Value = match serde_json::from_str(text) {
        Ok(body) => body,
        Err(_) if status >= 400 => {
            return Err(Error::Generic {
                message: format!("API error: {status} - {text}"),
                code: Some(i64::from(status)),
                details: None,
            });
        }
        Err(_) => return Err(Error::generic("Invalid JSON response from API")),
    };

    match ErrorEnvelope::from_body(&body, status) {
        Some(envelope) => Err(envelope.classify(parse_retry_after(retry_after))),
        None => Ok(body),
    }
}

/// Read a response and interpret it
pub(crate) async fn interpret(response: Response) -> Result<Value> {
    let status = response.status().as_u16();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let text = response.text().await?;

    interpret_body(status, retry_after.as_deref(), &text)
}
