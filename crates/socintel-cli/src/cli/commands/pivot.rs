//! `socintel pivot <text>` – open every configured lookup for an IOC.

use anyhow::{bail, Result};
use socintel_core::checksum;
use socintel_core::config::SocintelConfig;
use socintel_core::ioc::{detect_ioc_type, IocType};
use socintel_core::menu::{menu_item_id, ContextMenu};
use socintel_core::pivot::{Pivot, PivotOutcome};
use socintel_core::prefs::{PreferenceStore, SectionKey};
use std::path::PathBuf;

use crate::cli::host::TerminalHost;

#[derive(Debug)]
pub struct PivotArgs {
    pub text: Option<String>,
    pub kind: Option<SectionKey>,
    pub file: Option<PathBuf>,
    pub dry_run: bool,
}

/// Lookup section for an auto-detected IOC type.
pub(crate) fn section_for(kind: IocType) -> Option<SectionKey> {
    match kind {
        IocType::Ipv4 | IocType::Ipv6 => Some(SectionKey::Ip),
        IocType::Hash => Some(SectionKey::Hash),
        IocType::Url => Some(SectionKey::Url),
        IocType::Unknown => None,
    }
}

/// Auto-detect the section for `text`. A URL without a scheme, such as
/// `example.com/page`, is retried with `https://` in front.
pub(crate) fn detect_section(text: &str) -> Option<SectionKey> {
    section_for(detect_ioc_type(text)).or_else(|| {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.contains("://") {
            return None;
        }
        match detect_ioc_type(&format!("https://{trimmed}")) {
            IocType::Url => Some(SectionKey::Url),
            _ => None,
        }
    })
}

pub async fn run_pivot(store: &PreferenceStore, cfg: &SocintelConfig, args: PivotArgs) -> Result<()> {
    let (selection, section) = match (args.file, args.text) {
        (Some(path), _) => (checksum::sha256_path(&path).await?, SectionKey::Hash),
        (None, Some(text)) => {
            let section = match args.kind.or_else(|| detect_section(&text)) {
                Some(section) => section,
                None => bail!(
                    "not a recognised IOC: {text:?}; force a section with --kind ip|hash|url"
                ),
            };
            (text, section)
        }
        (None, None) => bail!("nothing to pivot on; pass text or --file"),
    };

    let mut menu = ContextMenu::new();
    menu.sync_from_storage(&store.get_all().await.unwrap_or_default());
    if !menu.contains(section) && store.load_preferences().await.section(section).active {
        // Nothing stored yet; the defaults are active.
        menu.update_item(section, true);
    }
    if !menu.contains(section) {
        bail!(
            "{} lookups are disabled; enable them with `socintel prefs set {section} active true`",
            section.label()
        );
    }

    let host = TerminalHost::new(cfg.launcher.clone(), args.dry_run);
    let outcome = Pivot::new(store)
        .handle_click(&host, &menu_item_id(section), &selection)
        .await;

    match outcome {
        PivotOutcome::Opened { tabs, .. } if tabs.is_empty() => {
            bail!("no lookup could be opened")
        }
        PivotOutcome::Opened { section, ioc, tabs, .. } => {
            tracing::info!(section = section.as_str(), ioc = %ioc, tabs = tabs.len(), "pivot done");
            Ok(())
        }
        PivotOutcome::Rejected { section, selection } => {
            bail!("{selection:?} is not a valid {} IOC", section.label())
        }
        PivotOutcome::Ignored => bail!("empty selection"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detected_types_map_to_sections() {
        assert_eq!(section_for(IocType::Ipv6), Some(SectionKey::Ip));
        assert_eq!(section_for(IocType::Hash), Some(SectionKey::Hash));
        assert_eq!(section_for(IocType::Unknown), None);
    }

    #[test]
    fn url_path_without_scheme_detects_as_url() {
        assert_eq!(detect_section("example.com/page"), Some(SectionKey::Url));
        assert_eq!(detect_section(" Evil.Example.com/a?b=c "), Some(SectionKey::Url));
        assert_eq!(detect_section("8.8.8.8"), Some(SectionKey::Ip));
    }

    #[test]
    fn garbage_stays_undetected() {
        assert_eq!(detect_section("not an ioc"), None);
        assert_eq!(detect_section("ftp://example.com/x"), None);
        assert_eq!(detect_section("   "), None);
    }
}
