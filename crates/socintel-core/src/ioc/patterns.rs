//! Compiled IOC grammars and the named predicates built on them.
//!
//! Every predicate normalises its input (trim + lowercase) and rejects
//! empty input before matching.

use once_cell::sync::Lazy;
use regex::Regex;

const OCTET: &str = r"(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";

/// Octet form used inside IPv6 embedded-IPv4 tails.
const TAIL_OCTET: &str = r"(25[0-5]|(2[0-4]|1?[0-9])?[0-9])";

static IPV4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{OCTET}\.({OCTET}\.){{2}}{OCTET}$")).expect("ipv4 pattern is valid")
});

static IPV6_RE: Lazy<Regex> = Lazy::new(|| {
    let h = "[0-9a-f]{1,4}";
    let v4 = format!(r"({TAIL_OCTET}\.){{3}}{TAIL_OCTET}");
    let alternatives = [
        format!("({h}:){{7}}{h}"),
        format!("({h}:){{1,7}}:"),
        format!("({h}:){{1,6}}:{h}"),
        format!("({h}:){{1,5}}(:{h}){{1,2}}"),
        format!("({h}:){{1,4}}(:{h}){{1,3}}"),
        format!("({h}:){{1,3}}(:{h}){{1,4}}"),
        format!("({h}:){{1,2}}(:{h}){{1,5}}"),
        format!("{h}:((:{h}){{1,6}})"),
        format!(":((:{h}){{1,7}}|:)"),
        "fe80:(:[0-9a-f]{0,4}){0,4}%[0-9a-z]+".to_string(),
        format!("::(ffff(:0{{1,4}})?:)?{v4}"),
        format!("({h}:){{1,4}}:{v4}"),
    ];
    Regex::new(&format!("^(?i-u:{})$", alternatives.join("|"))).expect("ipv6 pattern is valid")
});

static HASH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new("^([a-f0-9]{32}|[a-f0-9]{40}|[a-f0-9]{64})$").expect("hash pattern is valid")
});

static FULL_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(https?)://",
        r"(([^\s:@/]+(:[^\s:@/]*)?@)?",
        r"((?:[a-z0-9-]+\.)+[a-z]{2,})",
        r"(:[0-9]{2,5})?",
        r"(/\S*)?",
        r"(\?[^\s#]*)?",
        r"(#\S*)?)$",
    ))
    .expect("url pattern is valid")
});

static DOMAIN_ONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z0-9-]+\.)+[a-z]{2,}$").expect("domain pattern is valid"));

/// Trims and lowercases an IOC candidate.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

fn matches(re: &Regex, input: &str) -> bool {
    let normalized = normalize(input);
    !normalized.is_empty() && re.is_match(&normalized)
}

pub fn is_valid_ipv4(input: &str) -> bool {
    matches(&IPV4_RE, input)
}

/// Full IPv6 grammar: expanded, compressed, embedded IPv4 tails and
/// link-local addresses with a zone index (`fe80::1%eth0`).
pub fn is_valid_ipv6(input: &str) -> bool {
    matches(&IPV6_RE, input)
}

/// Hex digest of MD5, SHA-1 or SHA-256 length. Length is the only signal.
pub fn is_valid_hash(input: &str) -> bool {
    matches(&HASH_RE, input)
}

/// Either a full http(s) URL or a bare domain without scheme.
pub fn is_valid_url(input: &str) -> bool {
    let normalized = normalize(input);
    if normalized.is_empty() {
        return false;
    }
    FULL_URL_RE.is_match(&normalized) || DOMAIN_ONLY_RE.is_match(&normalized)
}
