//! `socintel sanitise <text> --kind ip|url` – defang an IOC.

use anyhow::Result;
use socintel_core::sanitise::{sanitise, SanitiseKind};

pub fn run_sanitise(text: &str, kind: SanitiseKind) -> Result<()> {
    println!("{}", sanitise(text.trim(), kind));
    Ok(())
}
