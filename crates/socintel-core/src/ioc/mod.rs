//! IOC classification.
//!
//! Recognises IPv4, IPv6, content hashes and URLs/domains in free text.
//! Classification is pure and total: every input maps to exactly one
//! [`IocType`], with [`IocType::Unknown`] as the fallback.

mod patterns;

pub use patterns::{is_valid_hash, is_valid_ipv4, is_valid_ipv6, is_valid_url, normalize};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of indicator detected in a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IocType {
    Ipv4,
    Ipv6,
    Hash,
    Url,
    Unknown,
}

impl IocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IocType::Ipv4 => "ipv4",
            IocType::Ipv6 => "ipv6",
            IocType::Hash => "hash",
            IocType::Url => "url",
            IocType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for IocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validators in detection order; first match wins.
const VALIDATORS: [(IocType, fn(&str) -> bool); 4] = [
    (IocType::Ipv4, is_valid_ipv4),
    (IocType::Ipv6, is_valid_ipv6),
    (IocType::Url, is_valid_url),
    (IocType::Hash, is_valid_hash),
];

/// Detects the IOC type of `input` (ipv4 → ipv6 → url → hash).
///
/// # Examples
///
/// - `detect_ioc_type("8.8.8.8")` → `IocType::Ipv4`
/// - `detect_ioc_type("d41d8cd98f00b204e9800998ecf8427e")` → `IocType::Hash`
/// - `detect_ioc_type("not an ioc!!")` → `IocType::Unknown`
pub fn detect_ioc_type(input: &str) -> IocType {
    VALIDATORS
        .iter()
        .find(|(_, validate)| validate(input))
        .map(|(kind, _)| *kind)
        .unwrap_or(IocType::Unknown)
}

/// Digest family implied by a hash's length. MD5/SHA-1/SHA-256 are not
/// otherwise distinguished, so this is a display hint only.
pub fn hash_algorithm_hint(input: &str) -> Option<&'static str> {
    if !is_valid_hash(input) {
        return None;
    }
    match normalize(input).len() {
        32 => Some("md5"),
        40 => Some("sha1"),
        64 => Some("sha256"),
        _ => None,
    }
}
