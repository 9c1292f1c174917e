//! Privacy group endpoints

use super::{created_id, success_flag};
use crate::error::{Error, Result};
use crate::http::{ApiRequest, ThreatExchangeClient};
use crate::models::ThreatPrivacyGroup;
use crate::pagination::Paginator;
use crate::types::Params;

#[derive(Debug, Clone, Copy)]
pub struct PrivacyGroups<'a> {
    client: &'a ThreatExchangeClient,
}

impl<'a> PrivacyGroups<'a> {
    pub(crate) fn new(client: &'a ThreatExchangeClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> Result<ThreatPrivacyGroup> {
        let body = self.client.get(id, Params::new()).await?;
        Ok(ThreatPrivacyGroup::from_value(body))
    }

    /// Groups the configured app belongs to
    ///
    /// Fails with a validation error, without contacting the API, when the
    /// credentials carry no app id.
    pub fn mine(&self, limit: Option<usize>) -> Result<Paginator<'a, ThreatPrivacyGroup>> {
        let app_id = self
            .client
            .credentials()
            .app_id()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::validation("app_id is required to list privacy groups"))?;

        Ok(self.client.paginate_with(
            format!("{app_id}/threat_exchange_members"),
            Params::new(),
            limit,
            ThreatPrivacyGroup::from_value,
        ))
    }

    /// Create a group, returning its id
    pub async fn create(&self, name: &str, description: &str) -> Result<String> {
        let data = Params::new()
            .with("name", name)
            .with("description", description);
        let body = self.client.post("threat_privacy_groups", data).await?;
        Ok(created_id(&body))
    }

    pub async fn add_member(&self, group_id: &str, member_id: &str) -> Result<bool> {
        let request = ApiRequest::post(format!("{group_id}/members")).form("member", member_id);
        let body = self.client.execute(&request).await?;
        Ok(success_flag(&body))
    }

    pub async fn remove_member(&self, group_id: &str, member_id: &str) -> Result<bool> {
        let request = ApiRequest::delete(format!("{group_id}/members")).query("member", member_id);
        let body = self.client.execute(&request).await?;
        Ok(success_flag(&body))
    }
}
