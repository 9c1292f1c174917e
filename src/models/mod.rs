//! Typed threat data
//!
//! Enumerations with raw fallbacks and the threat objects the endpoints
//! return.

mod enums;
mod fields;
mod threat;

pub use enums::{
    ApiEnum, DescriptorType, EnumValue, IndicatorType, PrecisionType, PrivacyType, ReviewStatus,
    Severity, ShareLevel, Status,
};
pub use fields::parse_timestamp;
pub use threat::{
    ThreatDescriptor, ThreatExchangeMember, ThreatIndicator, ThreatPrivacyGroup, ThreatTag,
    ThreatUpdate,
};

#[cfg(test)]
mod tests;
