//! Lookup URL templating.
//!
//! Templates are plain strings with `{ip}`, `{hash}`, `{url}`,
//! `{encodedUrl}` and `{domain}` placeholders. Expansion is substitution
//! only; the result always carries an http(s) scheme.

mod values;

pub use values::{domain_of, LookupValues};

const HTTP_PREFIX: &str = "http://";
pub(crate) const HTTPS_PREFIX: &str = "https://";

/// Prefixes `https://` unless `input` already starts with `http://` or
/// `https://` (case-insensitive).
pub fn normalise_url(input: &str) -> String {
    if has_http_scheme(input) {
        input.to_string()
    } else {
        format!("{HTTPS_PREFIX}{input}")
    }
}

pub(crate) fn has_http_scheme(input: &str) -> bool {
    starts_with_ignore_case(input, HTTP_PREFIX) || starts_with_ignore_case(input, HTTPS_PREFIX)
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Expands every known placeholder in one left-to-right pass and
/// normalises the scheme.
///
/// Known placeholders without a value expand to the empty string. Brace
/// tokens that are not placeholders are copied through untouched, and
/// substituted values are never re-scanned.
///
/// # Examples
///
/// - `expand("abuseipdb.com/check/{ip}", &LookupValues::ip("1.2.3.4"))`
///   → `"https://abuseipdb.com/check/1.2.3.4"`
pub fn expand(template: &str, values: &LookupValues) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let substituted = tail
            .find('}')
            .and_then(|close| values.lookup(&tail[1..close]).map(|v| (close, v)));
        match substituted {
            Some((close, value)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    normalise_url(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_ip_and_adds_scheme() {
        assert_eq!(
            expand("abuseipdb.com/check/{ip}", &LookupValues::ip("1.2.3.4")),
            "https://abuseipdb.com/check/1.2.3.4"
        );
    }

    #[test]
    fn keeps_existing_scheme_case_insensitive() {
        assert_eq!(
            expand("HTTP://shodan.io/host/{ip}", &LookupValues::ip("8.8.8.8")),
            "HTTP://shodan.io/host/8.8.8.8"
        );
        assert_eq!(
            expand("https://x.io/{hash}", &LookupValues::hash("abc")),
            "https://x.io/abc"
        );
    }

    #[test]
    fn replaces_every_occurrence() {
        assert_eq!(
            expand("x.io/{ip}?again={ip}", &LookupValues::ip("1.1.1.1")),
            "https://x.io/1.1.1.1?again=1.1.1.1"
        );
    }

    #[test]
    fn missing_values_become_empty() {
        assert_eq!(
            expand("x.io/{hash}/{ip}", &LookupValues::ip("1.1.1.1")),
            "https://x.io//1.1.1.1"
        );
    }

    #[test]
    fn unknown_tokens_are_left_alone() {
        assert_eq!(
            expand("x.io/{foo}/{ip}/{", &LookupValues::ip("1.1.1.1")),
            "https://x.io/{foo}/1.1.1.1/{"
        );
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        assert_eq!(
            expand("x.io/{url}", &LookupValues {
                url: Some("{ip}".to_string()),
                ip: Some("9.9.9.9".to_string()),
                ..Default::default()
            }),
            "https://x.io/{ip}"
        );
    }

    #[test]
    fn url_values_fill_encoded_and_domain() {
        let values = LookupValues::url("https://evil.example.com/a?b=c");
        assert_eq!(
            expand("urlhaus.abuse.ch/browse.php?search={encodedUrl}", &values),
            "https://urlhaus.abuse.ch/browse.php?search=https%3A%2F%2Fevil.example.com%2Fa%3Fb%3Dc"
        );
        assert_eq!(
            expand("virustotal.com/gui/domain/{domain}", &values),
            "https://virustotal.com/gui/domain/evil.example.com"
        );
    }

    #[test]
    fn bare_domain_url_fills_domain() {
        assert_eq!(
            expand("x.io/{domain}", &LookupValues::url("example.com")),
            "https://x.io/example.com"
        );
    }

    #[test]
    fn normalise_url_only_prefixes_when_needed() {
        assert_eq!(normalise_url("example.com"), "https://example.com");
        assert_eq!(normalise_url("http://example.com"), "http://example.com");
        assert_eq!(normalise_url("ftp://example.com"), "https://ftp://example.com");
    }
}
