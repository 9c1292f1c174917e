//! ThreatExchange member endpoints

use super::field_params;
use crate::error::Result;
use crate::http::ThreatExchangeClient;
use crate::models::ThreatExchangeMember;
use crate::pagination::Paginator;

#[derive(Debug, Clone, Copy)]
pub struct Members<'a> {
    client: &'a ThreatExchangeClient,
}

impl<'a> Members<'a> {
    pub(crate) fn new(client: &'a ThreatExchangeClient) -> Self {
        Self { client }
    }

    /// Every current member
    pub fn list(&self, fields: &[&str], limit: Option<usize>) -> Paginator<'a, ThreatExchangeMember> {
        self.client.paginate_with(
            "threat_exchange_members",
            field_params(fields),
            limit,
            ThreatExchangeMember::from_value,
        )
    }

    pub async fn get(&self, id: &str, fields: &[&str]) -> Result<ThreatExchangeMember> {
        let body = self.client.get(id, field_params(fields)).await?;
        Ok(ThreatExchangeMember::from_value(body))
    }
}
