//! User preferences: one section per IOC family, stored as a JSON blob.
//!
//! The default document doubles as the schema that stored data is
//! reconciled against on every load and save.

mod reconcile;
mod store;

pub use reconcile::{reconcile, reconcile_document};
pub use store::{PreferenceStore, StorageArea, StorageChange, StoreError};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Section key in the preference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Ip,
    Hash,
    Url,
}

impl SectionKey {
    pub const ALL: [SectionKey; 3] = [SectionKey::Ip, SectionKey::Hash, SectionKey::Url];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Ip => "ip",
            SectionKey::Hash => "hash",
            SectionKey::Url => "url",
        }
    }

    /// Human label used for menu titles and settings headings.
    pub fn label(&self) -> &'static str {
        match self {
            SectionKey::Ip => "IP",
            SectionKey::Hash => "Hash",
            SectionKey::Url => "URL",
        }
    }

    /// Whether this section offers clipboard defanging.
    pub fn supports_sanitise(&self) -> bool {
        !matches!(self, SectionKey::Hash)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ip" => Ok(SectionKey::Ip),
            "hash" => Ok(SectionKey::Hash),
            "url" => Ok(SectionKey::Url),
            other => Err(format!("unknown section: {other}")),
        }
    }
}

/// Settings for one IOC family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceSection {
    pub active: bool,
    pub copy_to_clipboard: bool,
    /// Absent for the hash section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanitise: Option<bool>,
    /// Lookup URL templates, in tab-opening order. Never empty once reconciled.
    pub urls: Vec<String>,
}

impl PreferenceSection {
    /// Effective sanitise flag (false where the section has none).
    pub fn sanitise_enabled(&self) -> bool {
        self.sanitise.unwrap_or(false)
    }
}

/// The full preference document (`{ ip, hash, url }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceDocument {
    pub ip: PreferenceSection,
    pub hash: PreferenceSection,
    pub url: PreferenceSection,
}

impl PreferenceDocument {
    pub fn section(&self, key: SectionKey) -> &PreferenceSection {
        match key {
            SectionKey::Ip => &self.ip,
            SectionKey::Hash => &self.hash,
            SectionKey::Url => &self.url,
        }
    }

    pub fn section_mut(&mut self, key: SectionKey) -> &mut PreferenceSection {
        match key {
            SectionKey::Ip => &mut self.ip,
            SectionKey::Hash => &mut self.hash,
            SectionKey::Url => &mut self.url,
        }
    }

    /// JSON form with the wire field names.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Default for PreferenceDocument {
    fn default() -> Self {
        fn urls(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        Self {
            ip: PreferenceSection {
                active: true,
                copy_to_clipboard: true,
                sanitise: Some(true),
                urls: urls(&[
                    "abuseipdb.com/check/{ip}",
                    "threatfox.abuse.ch/browse.php?search=ioc%3A{ip}",
                    "shodan.io/host/{ip}",
                ]),
            },
            hash: PreferenceSection {
                active: true,
                copy_to_clipboard: true,
                sanitise: None,
                urls: urls(&[
                    "virustotal.com/gui/file/{hash}",
                    "urlhaus.abuse.ch/browse.php?search={hash}",
                ]),
            },
            url: PreferenceSection {
                active: true,
                copy_to_clipboard: true,
                sanitise: Some(true),
                urls: urls(&[
                    "urlhaus.abuse.ch/browse.php?search={encodedUrl}",
                    "mxtoolbox.com/SuperTool.aspx?action=whois%3a{domain}",
                    "virustotal.com/gui/domain/{domain}",
                ]),
            },
        }
    }
}

/// Schema template the reconciler checks stored data against.
pub fn default_template() -> Value {
    PreferenceDocument::default().to_value()
}
