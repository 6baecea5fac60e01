//! Defanging of IOCs before they are copied to the clipboard.

use serde::{Deserialize, Serialize};

/// Which defanging rule to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitiseKind {
    Ip,
    Url,
}

/// Breaks the literal form of an IOC so it cannot be followed by accident.
///
/// - `Ip`: replaces the rightmost separator only. A trailing dotted tail
///   (`1.2.3.4`, `::ffff:1.2.3.4`) gets `[.]`, otherwise the last `:` gets
///   `[:]`.
/// - `Url`: every `.` becomes `[.]`.
pub fn sanitise(value: &str, kind: SanitiseKind) -> String {
    match kind {
        SanitiseKind::Ip => sanitise_ip(value),
        SanitiseKind::Url => value.replace('.', "[.]"),
    }
}

fn sanitise_ip(value: &str) -> String {
    let last_dot = value.rfind('.');
    let last_colon = value.rfind(':');

    let (at, replacement) = match (last_dot, last_colon) {
        (Some(dot), Some(colon)) if dot > colon => (dot, "[.]"),
        (Some(dot), None) => (dot, "[.]"),
        (_, Some(colon)) => (colon, "[:]"),
        (None, None) => return value.to_string(),
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push_str(&value[..at]);
    out.push_str(replacement);
    out.push_str(&value[at + 1..]);
    out
}
