//! `socintel expand <template>` – expand a lookup URL template.

use anyhow::Result;
use socintel_core::template::{expand, LookupValues};

pub fn run_expand(
    template: &str,
    ip: Option<String>,
    hash: Option<String>,
    url: Option<String>,
) -> Result<()> {
    let mut values = url.map(LookupValues::url).unwrap_or_default();
    values.ip = ip;
    values.hash = hash;
    println!("{}", expand(template, &values));
    Ok(())
}
