//! Incremental threat updates

use crate::http::ThreatExchangeClient;
use crate::models::ThreatUpdate;
use crate::pagination::Paginator;
use crate::types::Params;

/// Window and filters for [`Updates::list`]
#[derive(Debug, Clone, Default)]
pub struct UpdatesQuery {
    pub since: Option<i64>,
    pub until: Option<i64>,
    /// Object types, e.g. `THREAT_DESCRIPTOR`
    pub types: Vec<String>,
    pub fields: Vec<String>,
    pub limit: Option<usize>,
}

impl UpdatesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }

    #[must_use]
    pub fn until(mut self, until: i64) -> Self {
        self.until = Some(until);
        self
    }

    #[must_use]
    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert_opt("since", self.since);
        params.insert_opt("until", self.until);
        params.insert_list("types", &self.types);
        params.insert_list("fields", &self.fields);
        params
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Updates<'a> {
    client: &'a ThreatExchangeClient,
}

impl<'a> Updates<'a> {
    pub(crate) fn new(client: &'a ThreatExchangeClient) -> Self {
        Self { client }
    }

    /// Changes to a privacy group's threat data within the query window
    pub fn list(&self, privacy_group_id: &str, query: UpdatesQuery) -> Paginator<'a, ThreatUpdate> {
        self.client.paginate_with(
            format!("{privacy_group_id}/threat_updates"),
            query.to_params(),
            query.limit,
            ThreatUpdate::from_value,
        )
    }
}
