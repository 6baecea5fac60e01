//! Placeholder values for a single pivot.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::normalise_url;

/// Bytes left alone by a URI component encoding: alphanumerics and
/// `-_.!~*'()`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Values available to a template expansion. Unset fields expand to "".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupValues {
    pub ip: Option<String>,
    pub hash: Option<String>,
    pub url: Option<String>,
    pub encoded_url: Option<String>,
    pub domain: Option<String>,
}

impl LookupValues {
    pub fn ip(ip: impl Into<String>) -> Self {
        Self {
            ip: Some(ip.into()),
            ..Self::default()
        }
    }

    pub fn hash(hash: impl Into<String>) -> Self {
        Self {
            hash: Some(hash.into()),
            ..Self::default()
        }
    }

    /// Builds `{url}`, `{encodedUrl}` and `{domain}`. Input without an
    /// http(s) scheme gets `https://` first. The domain is best-effort and
    /// empty when the URL does not parse.
    pub fn url(url: impl Into<String>) -> Self {
        let url = normalise_url(&url.into());
        let encoded = encode_component(&url);
        let domain = domain_of(&url).unwrap_or_default();
        Self {
            url: Some(url),
            encoded_url: Some(encoded),
            domain: Some(domain),
            ..Self::default()
        }
    }

    /// Value for a placeholder name, `Some("")` for known names without a
    /// value and `None` for names that are not placeholders.
    pub(crate) fn lookup(&self, name: &str) -> Option<&str> {
        let slot = match name {
            "ip" => &self.ip,
            "hash" => &self.hash,
            "url" => &self.url,
            "encodedUrl" => &self.encoded_url,
            "domain" => &self.domain,
            _ => return None,
        };
        Some(slot.as_deref().unwrap_or(""))
    }
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Host part of `url`, if it parses.
pub fn domain_of(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed.host_str().map(|h| h.to_string())
}
