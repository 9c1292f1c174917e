//! Threat descriptor endpoints

use super::{created_id, field_params, success_flag};
use crate::error::Result;
use crate::http::{ApiRequest, ThreatExchangeClient};
use crate::models::{
    DescriptorType, EnumValue, PrivacyType, ReviewStatus, Severity, ShareLevel, Status,
    ThreatDescriptor,
};
use crate::pagination::Paginator;
use crate::types::Params;

const COLLECTION: &str = "threat_descriptors";

/// Filters for [`Descriptors::search`]
#[derive(Debug, Clone, Default)]
pub struct DescriptorSearch {
    pub text: Option<String>,
    pub descriptor_type: Option<EnumValue<DescriptorType>>,
    pub status: Option<EnumValue<Status>>,
    pub share_level: Option<EnumValue<ShareLevel>>,
    pub owner: Option<String>,
    pub tags: Vec<String>,
    pub since: Option<i64>,
    pub until: Option<i64>,
    pub strict_text: bool,
    pub fields: Vec<String>,
    pub limit: Option<usize>,
}

impl DescriptorSearch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn descriptor_type(mut self, descriptor_type: impl Into<EnumValue<DescriptorType>>) -> Self {
        self.descriptor_type = Some(descriptor_type.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<EnumValue<Status>>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn share_level(mut self, share_level: impl Into<EnumValue<ShareLevel>>) -> Self {
        self.share_level = Some(share_level.into());
        self
    }

    #[must_use]
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
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

    /// Match `text` exactly instead of as a substring
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

    /// Stop after this many descriptors
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query parameters for this search (the limit is applied client-side)
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert_opt("text", self.text.as_deref().filter(|t| !t.is_empty()));
        params.insert_opt("type", self.descriptor_type.as_ref().map(EnumValue::as_str));
        params.insert_opt("status", self.status.as_ref().map(EnumValue::as_str));
        params.insert_opt("share_level", self.share_level.as_ref().map(EnumValue::as_str));
        params.insert_opt("owner", self.owner.as_deref().filter(|o| !o.is_empty()));
        params.insert_list("tags", &self.tags);
        params.insert_opt("since", self.since);
        params.insert_opt("until", self.until);
        if self.strict_text {
            params.insert("strict_text", "true");
        }
        params.insert_list("fields", &self.fields);
        params
    }
}

/// A descriptor to submit
///
/// Sharing defaults to `AMBER`, status to `UNKNOWN` and privacy to
/// `VISIBLE`.
#[derive(Debug, Clone)]
pub struct NewDescriptor {
    pub indicator: String,
    pub descriptor_type: EnumValue<DescriptorType>,
    pub description: String,
    pub share_level: EnumValue<ShareLevel>,
    pub status: EnumValue<Status>,
    pub severity: Option<EnumValue<Severity>>,
    pub privacy_type: EnumValue<PrivacyType>,
    pub privacy_members: Vec<String>,
    pub tags: Vec<String>,
    pub expired_on: Option<i64>,
    pub first_active: Option<i64>,
    pub last_active: Option<i64>,
    pub review_status: Option<EnumValue<ReviewStatus>>,
}

impl NewDescriptor {
    pub fn new(
        indicator: impl Into<String>,
        descriptor_type: impl Into<EnumValue<DescriptorType>>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            indicator: indicator.into(),
            descriptor_type: descriptor_type.into(),
            description: description.into(),
            share_level: ShareLevel::Amber.into(),
            status: Status::Unknown.into(),
            severity: None,
            privacy_type: PrivacyType::Visible.into(),
            privacy_members: Vec::new(),
            tags: Vec::new(),
            expired_on: None,
            first_active: None,
            last_active: None,
            review_status: None,
        }
    }

    #[must_use]
    pub fn share_level(mut self, share_level: impl Into<EnumValue<ShareLevel>>) -> Self {
        self.share_level = share_level.into();
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<EnumValue<Status>>) -> Self {
        self.status = status.into();
        self
    }

    #[must_use]
    pub fn severity(mut self, severity: impl Into<EnumValue<Severity>>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    /// Restrict visibility to the given privacy groups
    #[must_use]
    pub fn privacy_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.privacy_type = PrivacyType::HasPrivacyGroup.into();
        self.privacy_members = groups.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn expired_on(mut self, timestamp: i64) -> Self {
        self.expired_on = Some(timestamp);
        self
    }

    #[must_use]
    pub fn first_active(mut self, timestamp: i64) -> Self {
        self.first_active = Some(timestamp);
        self
    }

    #[must_use]
    pub fn last_active(mut self, timestamp: i64) -> Self {
        self.last_active = Some(timestamp);
        self
    }

    #[must_use]
    pub fn review_status(mut self, review_status: impl Into<EnumValue<ReviewStatus>>) -> Self {
        self.review_status = Some(review_status.into());
        self
    }

    /// Form body for the create call
    pub fn to_params(&self) -> Params {
        let mut params = Params::new()
            .with("indicator", &self.indicator)
            .with("type", self.descriptor_type.as_str())
            .with("description", &self.description)
            .with("share_level", self.share_level.as_str())
            .with("status", self.status.as_str())
            .with("privacy_type", self.privacy_type.as_str());
        params.insert_opt("severity", self.severity.as_ref().map(EnumValue::as_str));
        params.insert_list("privacy_members", &self.privacy_members);
        params.insert_list("tags", &self.tags);
        params.insert_opt("expired_on", self.expired_on);
        params.insert_opt("first_active", self.first_active);
        params.insert_opt("last_active", self.last_active);
        params.insert_opt("review_status", self.review_status.as_ref().map(EnumValue::as_str));
        params
    }
}

/// Changes to an existing descriptor; unset fields are left alone
#[derive(Debug, Clone, Default)]
pub struct DescriptorUpdate {
    pub description: Option<String>,
    pub status: Option<EnumValue<Status>>,
    pub severity: Option<EnumValue<Severity>>,
    pub share_level: Option<EnumValue<ShareLevel>>,
    pub privacy_type: Option<EnumValue<PrivacyType>>,
    /// `Some(vec![])` clears the member list
    pub privacy_members: Option<Vec<String>>,
    pub expired_on: Option<i64>,
    pub first_active: Option<i64>,
    pub last_active: Option<i64>,
    pub review_status: Option<EnumValue<ReviewStatus>>,
}

impl DescriptorUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: impl Into<EnumValue<Status>>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn severity(mut self, severity: impl Into<EnumValue<Severity>>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    #[must_use]
    pub fn share_level(mut self, share_level: impl Into<EnumValue<ShareLevel>>) -> Self {
        self.share_level = Some(share_level.into());
        self
    }

    #[must_use]
    pub fn privacy_type(mut self, privacy_type: impl Into<EnumValue<PrivacyType>>) -> Self {
        self.privacy_type = Some(privacy_type.into());
        self
    }

    #[must_use]
    pub fn privacy_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.privacy_members = Some(members.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn expired_on(mut self, timestamp: i64) -> Self {
        self.expired_on = Some(timestamp);
        self
    }

    #[must_use]
    pub fn first_active(mut self, timestamp: i64) -> Self {
        self.first_active = Some(timestamp);
        self
    }

    #[must_use]
    pub fn last_active(mut self, timestamp: i64) -> Self {
        self.last_active = Some(timestamp);
        self
    }

    #[must_use]
    pub fn review_status(mut self, review_status: impl Into<EnumValue<ReviewStatus>>) -> Self {
        self.review_status = Some(review_status.into());
        self
    }

    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert_opt("description", self.description.as_deref());
        params.insert_opt("status", self.status.as_ref().map(EnumValue::as_str));
        params.insert_opt("severity", self.severity.as_ref().map(EnumValue::as_str));
        params.insert_opt("share_level", self.share_level.as_ref().map(EnumValue::as_str));
        params.insert_opt("privacy_type", self.privacy_type.as_ref().map(EnumValue::as_str));
        if let Some(ref members) = self.privacy_members {
            params.insert("privacy_members", members.join(","));
        }
        params.insert_opt("expired_on", self.expired_on);
        params.insert_opt("first_active", self.first_active);
        params.insert_opt("last_active", self.last_active);
        params.insert_opt("review_status", self.review_status.as_ref().map(EnumValue::as_str));
        params
    }
}

/// Threat descriptor operations
#[derive(Debug, Clone, Copy)]
pub struct Descriptors<'a> {
    client: &'a ThreatExchangeClient,
}

impl<'a> Descriptors<'a> {
    pub(crate) fn new(client: &'a ThreatExchangeClient) -> Self {
        Self { client }
    }

    /// Read one descriptor
    pub async fn get(&self, id: &str, fields: &[&str]) -> Result<ThreatDescriptor> {
        let body = self.client.get(id, field_params(fields)).await?;
        Ok(ThreatDescriptor::from_value(body))
    }

    /// Lazily search descriptors
    pub fn search(&self, search: DescriptorSearch) -> Paginator<'a, ThreatDescriptor> {
        self.client.paginate_with(
            COLLECTION,
            search.to_params(),
            search.limit,
            ThreatDescriptor::from_value,
        )
    }

    /// Submit a descriptor, returning its id
    pub async fn create(&self, descriptor: &NewDescriptor) -> Result<String> {
        let body = self.client.post(COLLECTION, descriptor.to_params()).await?;
        Ok(created_id(&body))
    }

    pub async fn update(&self, id: &str, update: &DescriptorUpdate) -> Result<bool> {
        let body = self.client.post(id, update.to_params()).await?;
        Ok(success_flag(&body))
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let body = self.client.delete(id, Params::new()).await?;
        Ok(success_flag(&body))
    }

    /// React to a descriptor (`HELPFUL`, `NOT_HELPFUL`, `OUTDATED`, ...)
    pub async fn add_reaction(&self, id: &str, reaction: &str) -> Result<bool> {
        let request = ApiRequest::post(format!("{id}/reactions")).form("reaction", reaction);
        let body = self.client.execute(&request).await?;
        Ok(success_flag(&body))
    }

    pub async fn remove_reaction(&self, id: &str) -> Result<bool> {
        let body = self
            .client
            .delete(&format!("{id}/reactions"), Params::new())
            .await?;
        Ok(success_flag(&body))
    }
}
