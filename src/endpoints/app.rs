//! Identity of the calling app

use crate::error::Result;
use crate::http::ThreatExchangeClient;
use crate::types::Params;
use serde_json::Value;

#[derive(Debug, Clone, Copy)]
pub struct App<'a> {
    client: &'a ThreatExchangeClient,
}

impl<'a> App<'a> {
    pub(crate) fn new(client: &'a ThreatExchangeClient) -> Self {
        Self { client }
    }

    /// The app the access token belongs to
    pub async fn me(&self) -> Result<Value> {
        self.client.get("me", Params::new()).await
    }

    /// Token metadata for the configured access token
    pub async fn debug_token(&self) -> Result<Value> {
        let params = Params::new().with("input_token", self.client.credentials().access_token());
        self.client.get("debug_token", params).await
    }
}
