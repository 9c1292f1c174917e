//! Threat indicator endpoints

use super::field_params;
use crate::error::Result;
use crate::http::ThreatExchangeClient;
use crate::models::{EnumValue, IndicatorType, ThreatDescriptor, ThreatIndicator};
use crate::pagination::Paginator;
use crate::types::Params;

/// Filters for [`Indicators::search`]
#[derive(Debug, Clone, Default)]
pub struct IndicatorSearch {
    pub text: Option<String>,
    pub indicator_type: Option<EnumValue<IndicatorType>>,
    pub since: Option<i64>,
    pub until: Option<i64>,
    pub strict_text: bool,
    pub fields: Vec<String>,
    pub limit: Option<usize>,
}

impl IndicatorSearch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn indicator_type(mut self, indicator_type: impl Into<EnumValue<IndicatorType>>) -> Self {
        self.indicator_type = Some(indicator_type.into());
        self
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
    pub fn strict_text(mut self, strict: bool) -> Self {
        self.strict_text = strict;
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
        params.insert_opt("text", self.text.as_deref().filter(|t| !t.is_empty()));
        params.insert_opt("type", self.indicator_type.as_ref().map(EnumValue::as_str));
        params.insert_opt("since", self.since);
        params.insert_opt("until", self.until);
        if self.strict_text {
            params.insert("strict_text", "true");
        }
        params.insert_list("fields", &self.fields);
        params
    }
}

/// Threat indicator operations
#[derive(Debug, Clone, Copy)]
pub struct Indicators<'a> {
    client: &'a ThreatExchangeClient,
}

impl<'a> Indicators<'a> {
    pub(crate) fn new(client: &'a ThreatExchangeClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str, fields: &[&str]) -> Result<ThreatIndicator> {
        let body = self.client.get(id, field_params(fields)).await?;
        Ok(ThreatIndicator::from_value(body))
    }

    pub fn search(&self, search: IndicatorSearch) -> Paginator<'a, ThreatIndicator> {
        self.client.paginate_with(
            "threat_indicators",
            search.to_params(),
            search.limit,
            ThreatIndicator::from_value,
        )
    }

    /// Descriptors members have submitted for one indicator
    pub fn descriptors(
        &self,
        indicator_id: &str,
        fields: &[&str],
        limit: Option<usize>,
    ) -> Paginator<'a, ThreatDescriptor> {
        self.client.paginate_with(
            format!("{indicator_id}/descriptors"),
            field_params(fields),
            limit,
            ThreatDescriptor::from_value,
        )
    }
}
