use super::*;
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

// ============================================================================
// Enums
// ============================================================================

#[test_case("HASH_MD5", IndicatorType::HashMd5)]
#[test_case("HASH_SHA3_256", IndicatorType::HashSha3_256)]
#[test_case("IP_ADDRESS", IndicatorType::IpAddress)]
#[test_case("WHOIS_ADDR1", IndicatorType::WhoisAddr1)]
fn test_indicator_type_wire(wire: &str, expected: IndicatorType) {
    assert_eq!(IndicatorType::from_wire(wire), Some(expected));
    assert_eq!(expected.as_str(), wire);
    assert_eq!(expected.to_string(), wire);
}

#[test]
fn test_enum_wire_strings_unique() {
    let mut seen = std::collections::HashSet::new();
    for value in IndicatorType::ALL {
        assert!(seen.insert(value.as_str()), "duplicate {}", value);
    }
}

#[test]
fn test_enum_from_str() {
    assert_eq!("MALICIOUS".parse::<Status>(), Ok(Status::Malicious));
    assert!("malicious".parse::<Status>().is_err());
    assert_eq!("AMBER".parse::<ShareLevel>(), Ok(ShareLevel::Amber));
}

#[test]
fn test_enum_value_raw_fallback() {
    let value: EnumValue<Severity> = EnumValue::parse("APOCALYPTIC");
    assert_eq!(value, EnumValue::Raw("APOCALYPTIC".to_string()));
    assert_eq!(value.known(), None);
    assert_eq!(value.as_str(), "APOCALYPTIC");

    let value: EnumValue<Severity> = "SEVERE".into();
    assert_eq!(value.known(), Some(Severity::Severe));
}

#[test]
fn test_enum_value_serde() {
    let value: EnumValue<PrecisionType> = serde_json::from_value(json!("HIGH")).unwrap();
    assert_eq!(value, EnumValue::Known(PrecisionType::High));
    assert_eq!(serde_json::to_value(&value).unwrap(), json!("HIGH"));

    let raw: EnumValue<PrecisionType> = serde_json::from_value(json!("EXTREME")).unwrap();
    assert_eq!(serde_json::to_value(&raw).unwrap(), json!("EXTREME"));
}

// ============================================================================
// Timestamps
// ============================================================================

#[test]
fn test_parse_timestamp_formats() {
    let expected = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

    assert_eq!(parse_timestamp(&json!(1704164645)), Some(expected));
    assert_eq!(parse_timestamp(&json!("1704164645")), Some(expected));
    assert_eq!(parse_timestamp(&json!("2024-01-02T03:04:05Z")), Some(expected));
    assert_eq!(parse_timestamp(&json!("2024-01-02T03:04:05+0000")), Some(expected));
    assert_eq!(parse_timestamp(&json!("2024-01-02T04:04:05+01:00")), Some(expected));
}

#[test]
fn test_parse_timestamp_rejects_garbage() {
    assert_eq!(parse_timestamp(&json!("yesterday")), None);
    assert_eq!(parse_timestamp(&json!(null)), None);
    assert_eq!(parse_timestamp(&json!({"t": 1})), None);
}

// ============================================================================
// Models
// ============================================================================

#[test]
fn test_descriptor_full() {
    let value = json!({
        "id": "123456789",
        "indicator": {"id": "987", "indicator": "evil.example.com", "type": "DOMAIN"},
        "type": "DOMAIN",
        "status": "MALICIOUS",
        "severity": "SEVERE",
        "share_level": "AMBER",
        "description": "phishing landing page",
        "owner": {"id": "42", "name": "Acme Security", "email": "sec@acme.example"},
        "privacy_type": "HAS_PRIVACY_GROUP",
        "review_status": "REVIEWED_MANUALLY",
        "precision": "HIGH",
        "added_on": "2024-01-02T03:04:05+0000",
        "last_updated": 1704164645,
        "tags": {"data": [{"id": "1", "text": "phishing"}, {"id": "2", "text": "ecrime"}]},
        "reactions": {"HELPFUL": 3}
    });

    let descriptor = ThreatDescriptor::from_value(value.clone());

    assert_eq!(descriptor.id, "123456789");
    assert_eq!(descriptor.indicator.as_deref(), Some("evil.example.com"));
    assert_eq!(
        descriptor.indicator_type.as_ref().and_then(EnumValue::known),
        Some(IndicatorType::Domain)
    );
    assert_eq!(
        descriptor.status.as_ref().and_then(EnumValue::known),
        Some(Status::Malicious)
    );
    assert_eq!(
        descriptor.share_level.as_ref().and_then(EnumValue::known),
        Some(ShareLevel::Amber)
    );
    assert_eq!(descriptor.owner_id.as_deref(), Some("42"));
    assert_eq!(descriptor.owner_name.as_deref(), Some("Acme Security"));
    assert_eq!(descriptor.owner_email.as_deref(), Some("sec@acme.example"));
    assert_eq!(descriptor.tags, vec!["phishing", "ecrime"]);
    assert_eq!(descriptor.reactions.get("HELPFUL"), Some(&json!(3)));
    assert_eq!(descriptor.added_on, descriptor.last_updated);
    assert_eq!(descriptor.raw, value);
}

#[test]
fn test_descriptor_indicator_fallbacks() {
    let flat = ThreatDescriptor::from_value(json!({"id": "1", "indicator": "1.2.3.4"}));
    assert_eq!(flat.indicator.as_deref(), Some("1.2.3.4"));

    let raw = ThreatDescriptor::from_value(json!({"id": "2", "raw_indicator": "abc"}));
    assert_eq!(raw.indicator.as_deref(), Some("abc"));

    let none = ThreatDescriptor::from_value(json!({"id": "3"}));
    assert_eq!(none.indicator, None);
}

#[test]
fn test_descriptor_minimal_and_unknown_values() {
    let descriptor = ThreatDescriptor::from_value(json!({
        "id": 55,
        "status": "QUANTUM",
        "tags": "not-a-list",
        "owner": "nobody"
    }));

    assert_eq!(descriptor.id, "55");
    assert_eq!(descriptor.status, Some(EnumValue::Raw("QUANTUM".to_string())));
    assert!(descriptor.tags.is_empty());
    assert_eq!(descriptor.owner_id, None);
    assert!(descriptor.reactions.is_empty());
}

#[test]
fn test_descriptor_serializes_wire_names() {
    let descriptor = ThreatDescriptor::from_value(json!({
        "id": "1",
        "type": "HASH_MD5",
        "status": "UNKNOWN"
    }));
    let out = serde_json::to_value(&descriptor).unwrap();

    assert_eq!(out["type"], json!("HASH_MD5"));
    assert_eq!(out["status"], json!("UNKNOWN"));
    assert!(out.get("raw").is_none());
}

#[test]
fn test_indicator() {
    let indicator = ThreatIndicator::from_value(json!({
        "id": "77",
        "indicator": "d41d8cd98f00b204e9800998ecf8427e",
        "type": "HASH_MD5",
        "added_on": "2023-06-01T00:00:00+0000"
    }));

    assert_eq!(indicator.id, "77");
    assert_eq!(
        indicator.indicator_type.and_then(|t| t.known()),
        Some(IndicatorType::HashMd5)
    );
    assert_eq!(
        indicator.added_on,
        Some(Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(indicator.last_updated, None);
}

#[test]
fn test_tag() {
    let tag = ThreatTag::from_value(json!({
        "id": "9",
        "text": "malware",
        "tagged_objects_count": "12"
    }));
    assert_eq!(
        tag,
        ThreatTag {
            id: "9".to_string(),
            text: "malware".to_string(),
            tagged_objects_count: 12,
        }
    );
}

#[test]
fn test_privacy_group_defaults() {
    let group = ThreatPrivacyGroup::from_value(json!({"id": "5", "name": "partners"}));

    assert_eq!(group.name, "partners");
    assert_eq!(group.description, "");
    assert!(group.members_can_see);
    assert!(group.members_can_use);
    assert_eq!(group.member_count, 0);

    let locked = ThreatPrivacyGroup::from_value(json!({
        "id": "6",
        "members_can_see": false,
        "members_can_use": "false",
        "member_count": 4
    }));
    assert!(!locked.members_can_see);
    assert!(!locked.members_can_use);
    assert_eq!(locked.member_count, 4);
}

#[test]
fn test_member() {
    let member = ThreatExchangeMember::from_value(json!({"id": "1", "name": "Acme"}));
    assert_eq!(member.name, "Acme");
    assert_eq!(member.email, None);
}

#[test]
fn test_update() {
    let update = ThreatUpdate::from_value(json!({
        "id": "u1",
        "type": "descriptor",
        "time": 1704164645,
        "should_delete": true
    }));

    assert_eq!(update.update_type.as_deref(), Some("descriptor"));
    assert!(update.should_delete);
    assert_eq!(update.time, Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()));
    assert_eq!(serde_json::to_value(&update).unwrap()["type"], json!("descriptor"));
}
