//! Threat data objects
//!
//! Every model is built from a JSON object with [`from_value`]-style
//! constructors that never fail: missing or mistyped fields fall back to
//! their defaults, and the objects that the API extends over time keep the
//! raw JSON alongside the typed fields.
//!
//! [`from_value`]: ThreatDescriptor::from_value

use super::enums::{
    EnumValue, IndicatorType, PrecisionType, PrivacyType, ReviewStatus, Severity, ShareLevel,
    Status,
};
use super::fields::{bool_field, enum_field, string_field, timestamp_field, u64_field};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

// ============================================================================
// Tags, Groups and Members
// ============================================================================

/// A label grouping threat objects together
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ThreatTag {
    pub id: String,
    pub text: String,
    pub tagged_objects_count: u64,
}

impl ThreatTag {
    pub fn from_value(value: Value) -> Self {
        Self {
            id: string_field(&value, "id").unwrap_or_default(),
            text: string_field(&value, "text").unwrap_or_default(),
            tagged_objects_count: u64_field(&value, "tagged_objects_count").unwrap_or(0),
        }
    }
}

/// A list of members threat data is shared with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreatPrivacyGroup {
    pub id: String,
    pub name: String,
    pub description: String,
    pub members_can_see: bool,
    pub members_can_use: bool,
    pub member_count: u64,
}

impl ThreatPrivacyGroup {
    pub fn from_value(value: Value) -> Self {
        Self {
            id: string_field(&value, "id").unwrap_or_default(),
            name: string_field(&value, "name").unwrap_or_default(),
            description: string_field(&value, "description").unwrap_or_default(),
            members_can_see: bool_field(&value, "members_can_see").unwrap_or(true),
            members_can_use: bool_field(&value, "members_can_use").unwrap_or(true),
            member_count: u64_field(&value, "member_count").unwrap_or(0),
        }
    }
}

/// A ThreatExchange participant (usually an app)
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ThreatExchangeMember {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

impl ThreatExchangeMember {
    pub fn from_value(value: Value) -> Self {
        Self {
            id: string_field(&value, "id").unwrap_or_default(),
            name: string_field(&value, "name").unwrap_or_default(),
            email: string_field(&value, "email"),
        }
    }
}

// ============================================================================
// Indicators and Descriptors
// ============================================================================

/// An indicator of compromise: a domain, IP, hash, ...
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ThreatIndicator {
    pub id: String,
    pub indicator: Option<String>,
    #[serde(rename = "type")]
    pub indicator_type: Option<EnumValue<IndicatorType>>,
    pub added_on: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub raw: Value,
}

impl ThreatIndicator {
    pub fn from_value(value: Value) -> Self {
        Self {
            id: string_field(&value, "id").unwrap_or_default(),
            indicator: string_field(&value, "indicator"),
            indicator_type: enum_field(&value, "type"),
            added_on: timestamp_field(&value, "added_on"),
            last_updated: timestamp_field(&value, "last_updated"),
            raw: value,
        }
    }
}

/// A member's assessment of an indicator
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ThreatDescriptor {
    pub id: String,
    pub indicator: Option<String>,
    #[serde(rename = "type")]
    pub indicator_type: Option<EnumValue<IndicatorType>>,
    pub status: Option<EnumValue<Status>>,
    pub severity: Option<EnumValue<Severity>>,
    pub share_level: Option<EnumValue<ShareLevel>>,
    pub description: Option<String>,
    pub owner_id: Option<String>,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
    pub privacy_type: Option<EnumValue<PrivacyType>>,
    pub review_status: Option<EnumValue<ReviewStatus>>,
    pub precision: Option<EnumValue<PrecisionType>>,
    pub added_on: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub expired_on: Option<DateTime<Utc>>,
    pub first_active: Option<DateTime<Utc>>,
    pub last_active: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub reactions: Map<String, Value>,
    #[serde(skip)]
    pub raw: Value,
}

impl ThreatDescriptor {
    pub fn from_value(value: Value) -> Self {
        let owner = value.get("owner").cloned().unwrap_or(Value::Null);

        // Nested `{"indicator": {"indicator": ..}}` on full reads, a bare
        // string on some list views, `raw_indicator` otherwise.
        let indicator = match value.get("indicator") {
            Some(nested @ Value::Object(_)) => string_field(nested, "indicator"),
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => string_field(&value, "raw_indicator"),
        };

        let tags = value
            .get("tags")
            .and_then(|tags| tags.get("data"))
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .map(|tag| string_field(tag, "text").unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();

        let reactions = value
            .get("reactions")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Self {
            id: string_field(&value, "id").unwrap_or_default(),
            indicator,
            indicator_type: enum_field(&value, "type"),
            status: enum_field(&value, "status"),
            severity: enum_field(&value, "severity"),
            share_level: enum_field(&value, "share_level"),
            description: string_field(&value, "description"),
            owner_id: string_field(&owner, "id"),
            owner_name: string_field(&owner, "name"),
            owner_email: string_field(&owner, "email"),
            privacy_type: enum_field(&value, "privacy_type"),
            review_status: enum_field(&value, "review_status"),
            precision: enum_field(&value, "precision"),
            added_on: timestamp_field(&value, "added_on"),
            last_updated: timestamp_field(&value, "last_updated"),
            expired_on: timestamp_field(&value, "expired_on"),
            first_active: timestamp_field(&value, "first_active"),
            last_active: timestamp_field(&value, "last_active"),
            tags,
            reactions,
            raw: value,
        }
    }
}

// ============================================================================
// Updates
// ============================================================================

/// One change in a privacy group's threat data, for incremental sync
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ThreatUpdate {
    pub id: String,
    #[serde(rename = "type")]
    pub update_type: Option<String>,
    pub time: Option<DateTime<Utc>>,
    pub should_delete: bool,
    #[serde(skip)]
    pub raw: Value,
}

impl ThreatUpdate {
    pub fn from_value(value: Value) -> Self {
        Self {
            id: string_field(&value, "id").unwrap_or_default(),
            update_type: string_field(&value, "type"),
            time: timestamp_field(&value, "time"),
            should_delete: bool_field(&value, "should_delete").unwrap_or(false),
            raw: value,
        }
    }
}
