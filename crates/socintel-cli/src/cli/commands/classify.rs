//! `socintel classify <text>` – print the IOC type.

use anyhow::Result;
use socintel_core::ioc::{detect_ioc_type, hash_algorithm_hint, IocType};

pub fn run_classify(text: &str) -> Result<()> {
    let kind = detect_ioc_type(text);
    match (kind, hash_algorithm_hint(text)) {
        (IocType::Hash, Some(hint)) => println!("{kind} ({hint} length)"),
        _ => println!("{kind}"),
    }
    Ok(())
}
