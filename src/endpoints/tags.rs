//! Threat tag endpoints

use crate::error::Result;
use crate::http::ThreatExchangeClient;
use crate::models::{ThreatDescriptor, ThreatTag};
use crate::pagination::Paginator;
use crate::types::Params;

#[derive(Debug, Clone, Copy)]
pub struct Tags<'a> {
    client: &'a ThreatExchangeClient,
}

impl<'a> Tags<'a> {
    pub(crate) fn new(client: &'a ThreatExchangeClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> Result<ThreatTag> {
        let body = self.client.get(id, Params::new()).await?;
        Ok(ThreatTag::from_value(body))
    }

    /// Tags whose text matches `text`
    pub fn search(&self, text: &str, limit: Option<usize>) -> Paginator<'a, ThreatTag> {
        self.client.paginate_with(
            "threat_tags",
            Params::new().with("text", text),
            limit,
            ThreatTag::from_value,
        )
    }

    /// Descriptors carrying the tag
    pub fn tagged_objects(
        &self,
        tag_id: &str,
        limit: Option<usize>,
    ) -> Paginator<'a, ThreatDescriptor> {
        self.client.paginate_with(
            format!("{tag_id}/tagged_objects"),
            Params::new(),
            limit,
            ThreatDescriptor::from_value,
        )
    }
}
