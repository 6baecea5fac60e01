//! Selection validation and lookup planning (no I/O).

use crate::ioc::{is_valid_hash, is_valid_ipv4, is_valid_ipv6, is_valid_url, normalize};
use crate::prefs::{PreferenceSection, SectionKey};
use crate::sanitise::{sanitise, SanitiseKind};
use crate::template::{expand, has_http_scheme, LookupValues, HTTPS_PREFIX};

/// A selection that passed validation for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedPivot {
    pub section: SectionKey,
    /// Normalised IOC as it is substituted and copied.
    pub ioc: String,
    pub values: LookupValues,
}

/// Validates `selection` for `section`.
///
/// The selection is trimmed and lowercased. URL selections without an
/// http(s) scheme get `https://` before validation.
pub fn prepare_pivot(section: SectionKey, selection: &str) -> Option<PreparedPivot> {
    let trimmed = normalize(selection);
    match section {
        SectionKey::Ip => (is_valid_ipv4(&trimmed) || is_valid_ipv6(&trimmed)).then(|| PreparedPivot {
            section,
            values: LookupValues::ip(trimmed.clone()),
            ioc: trimmed,
        }),
        SectionKey::Hash => is_valid_hash(&trimmed).then(|| PreparedPivot {
            section,
            values: LookupValues::hash(trimmed.clone()),
            ioc: trimmed,
        }),
        SectionKey::Url => {
            let input = if has_http_scheme(&trimmed) {
                trimmed
            } else {
                format!("{HTTPS_PREFIX}{trimmed}")
            };
            is_valid_url(&input).then(|| PreparedPivot {
                section,
                values: LookupValues::url(input.clone()),
                ioc: input,
            })
        }
    }
}

impl PreparedPivot {
    /// Expanded lookup URLs in the section's configured order.
    pub fn lookup_urls(&self, prefs: &PreferenceSection) -> Vec<String> {
        prefs
            .urls
            .iter()
            .map(|template| expand(template, &self.values))
            .collect()
    }

    /// Text to put on the clipboard, if the section asks for it. Hashes are
    /// never defanged.
    pub fn clipboard_text(&self, prefs: &PreferenceSection) -> Option<String> {
        if !prefs.copy_to_clipboard {
            return None;
        }
        let kind = match self.section {
            SectionKey::Ip => Some(SanitiseKind::Ip),
            SectionKey::Url => Some(SanitiseKind::Url),
            SectionKey::Hash => None,
        };
        Some(match kind {
            Some(kind) if prefs.sanitise_enabled() => sanitise(&self.ioc, kind),
            _ => self.ioc.clone(),
        })
    }
}
