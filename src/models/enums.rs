//! Enumerated API values
//!
//! The API adds enum values over time, so every enum field is read as an
//! [`EnumValue`]: a known variant, or the raw string when the value is not
//! one this client knows yet.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An enum with a fixed wire representation
pub trait ApiEnum: Sized + Copy {
    /// Wire string for this variant
    fn as_str(&self) -> &'static str;

    /// Parse a wire string
    fn from_wire(value: &str) -> Option<Self>;
}

/// Known variant or raw fallback
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnumValue<E> {
    Known(E),
    Raw(String),
}

impl<E: ApiEnum> EnumValue<E> {
    /// Parse a wire string, falling back to `Raw`
    pub fn parse(value: &str) -> Self {
        E::from_wire(value).map_or_else(|| Self::Raw(value.to_string()), Self::Known)
    }

    /// Wire string
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(e) => e.as_str(),
            Self::Raw(s) => s,
        }
    }

    /// The known variant, if recognised
    pub fn known(&self) -> Option<E> {
        match self {
            Self::Known(e) => Some(*e),
            Self::Raw(_) => None,
        }
    }
}

impl<E: ApiEnum> From<E> for EnumValue<E> {
    fn from(value: E) -> Self {
        Self::Known(value)
    }
}

impl<E: ApiEnum> From<&str> for EnumValue<E> {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl<E: ApiEnum> From<String> for EnumValue<E> {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl<E: ApiEnum> fmt::Display for EnumValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<E: ApiEnum> Serialize for EnumValue<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, E: ApiEnum> Deserialize<'de> for EnumValue<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

macro_rules! api_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];
        }

        impl ApiEnum for $name {
            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            fn from_wire(value: &str) -> Option<Self> {
                match value {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::from_wire(value)
                    .ok_or_else(|| format!("unknown {} value: {value}", stringify!($name)))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

api_enum! {
    /// Type of a threat indicator
    IndicatorType {
        AdjustToken => "ADJUST_TOKEN",
        ApiKey => "API_KEY",
        AsNumber => "AS_NUMBER",
        Banner => "BANNER",
        CmdLine => "CMD_LINE",
        CookieName => "COOKIE_NAME",
        Crx => "CRX",
        DebugString => "DEBUG_STRING",
        DestPort => "DEST_PORT",
        Directory => "DIRECTORY",
        Domain => "DOMAIN",
        EmailAddress => "EMAIL_ADDRESS",
        FileCreated => "FILE_CREATED",
        FileDeleted => "FILE_DELETED",
        FileMoved => "FILE_MOVED",
        FileName => "FILE_NAME",
        FileOpened => "FILE_OPENED",
        FileRead => "FILE_READ",
        FileWritten => "FILE_WRITTEN",
        HashImphash => "HASH_IMPHASH",
        HashMd5 => "HASH_MD5",
        HashPdq => "HASH_PDQ",
        HashSha1 => "HASH_SHA1",
        HashSha256 => "HASH_SHA256",
        HashSha3_256 => "HASH_SHA3_256",
        HashSsdeep => "HASH_SSDEEP",
        HashTmk => "HASH_TMK",
        HtmlId => "HTML_ID",
        HttpRequest => "HTTP_REQUEST",
        IpAddress => "IP_ADDRESS",
        IpSubnet => "IP_SUBNET",
        Isp => "ISP",
        Latitude => "LATITUDE",
        LaunchAgent => "LAUNCH_AGENT",
        Location => "LOCATION",
        Longitude => "LONGITUDE",
        MalwareName => "MALWARE_NAME",
        MemoryAlloc => "MEMORY_ALLOC",
        MemoryProtect => "MEMORY_PROTECT",
        MemoryWritten => "MEMORY_WRITTEN",
        MutantCreated => "MUTANT_CREATED",
        Mutex => "MUTEX",
        NameServer => "NAME_SERVER",
        OtherFileOp => "OTHER_FILE_OP",
        Password => "PASSWORD",
        PasswordSalt => "PASSWORD_SALT",
        PayloadData => "PAYLOAD_DATA",
        PayloadType => "PAYLOAD_TYPE",
        PostData => "POST_DATA",
        Protocol => "PROTOCOL",
        Referer => "REFERER",
        Registrar => "REGISTRAR",
        RegistryKey => "REGISTRY_KEY",
        RegKeyCreated => "REG_KEY_CREATED",
        RegKeyDeleted => "REG_KEY_DELETED",
        RegKeyEnumerated => "REG_KEY_ENUMERATED",
        RegKeyMonitored => "REG_KEY_MONITORED",
        RegKeyOpened => "REG_KEY_OPENED",
        RegKeyValueCreated => "REG_KEY_VALUE_CREATED",
        RegKeyValueDeleted => "REG_KEY_VALUE_DELETED",
        RegKeyValueModified => "REG_KEY_VALUE_MODIFIED",
        RegKeyValueQueried => "REG_KEY_VALUE_QUERIED",
        Signature => "SIGNATURE",
        SourcePort => "SOURCE_PORT",
        Telephone => "TELEPHONE",
        TextString => "TEXT_STRING",
        TrendQuery => "TREND_QUERY",
        Uri => "URI",
        UserAgent => "USER_AGENT",
        VolumeQueried => "VOLUME_QUERIED",
        WebstorageKey => "WEBSTORAGE_KEY",
        WebPayload => "WEB_PAYLOAD",
        WhoisName => "WHOIS_NAME",
        WhoisAddr1 => "WHOIS_ADDR1",
        WhoisAddr2 => "WHOIS_ADDR2",
        Xpi => "XPI",
    }
}

/// Descriptors describe indicators, so they share the type list
pub type DescriptorType = IndicatorType;

api_enum! {
    /// Maliciousness of a threat
    Status {
        Malicious => "MALICIOUS",
        NonMalicious => "NON_MALICIOUS",
        Suspicious => "SUSPICIOUS",
        Unknown => "UNKNOWN",
    }
}

api_enum! {
    /// Severity, least to most severe
    Severity {
        Info => "INFO",
        Warning => "WARNING",
        Severe => "SEVERE",
    }
}

api_enum! {
    /// Traffic Light Protocol sharing level
    ShareLevel {
        /// Unlimited sharing
        White => "WHITE",
        /// Community sharing
        Green => "GREEN",
        /// Limited sharing
        Amber => "AMBER",
        /// Most restricted
        Red => "RED",
    }
}

api_enum! {
    ReviewStatus {
        ReviewedAutomatically => "REVIEWED_AUTOMATICALLY",
        ReviewedManually => "REVIEWED_MANUALLY",
        Unreviewed => "UNREVIEWED",
    }
}

api_enum! {
    /// Visibility of a threat object
    PrivacyType {
        Visible => "VISIBLE",
        HasPrivacyGroup => "HAS_PRIVACY_GROUP",
        HasWhitelist => "HAS_WHITELIST",
    }
}

api_enum! {
    /// Detection precision
    PrecisionType {
        Unknown => "UNKNOWN",
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
    }
}
