//! Pivot handler: turns a context-menu click on a selection into lookup
//! tabs and an optional clipboard write.
//!
//! The host platform (tabs, clipboard) sits behind [`Host`]. Host failures
//! are logged and never abort the rest of a pivot.

mod prepare;

pub use prepare::{prepare_pivot, PreparedPivot};

use anyhow::Result;

use crate::menu::{parse_menu_item, MENU_ID_PREFIX};
use crate::prefs::{PreferenceStore, SectionKey};

/// Platform operations a pivot needs.
#[allow(async_fn_in_trait)]
pub trait Host {
    /// Position of the currently focused tab; new tabs open right after it.
    async fn active_tab_index(&self) -> Result<usize>;
    async fn open_tab(&self, url: &str, index: usize, active: bool) -> Result<()>;
    async fn write_clipboard(&self, text: &str) -> Result<()>;
}

/// What a click resulted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PivotOutcome {
    /// Empty selection or an item id that is not ours.
    Ignored,
    /// The selection is not a valid IOC for the clicked section.
    Rejected { section: SectionKey, selection: String },
    Opened {
        section: SectionKey,
        ioc: String,
        /// Lookup URLs that were opened successfully, in order.
        tabs: Vec<String>,
        /// Clipboard text, if it was written.
        copied: Option<String>,
    },
}

pub struct Pivot<'a> {
    store: &'a PreferenceStore,
}

impl<'a> Pivot<'a> {
    pub fn new(store: &'a PreferenceStore) -> Self {
        Self { store }
    }

    /// Handle a click on menu item `menu_item_id` with `selection` as text.
    pub async fn handle_click<H: Host>(
        &self,
        host: &H,
        menu_item_id: &str,
        selection: &str,
    ) -> PivotOutcome {
        if selection.is_empty() || !menu_item_id.starts_with(MENU_ID_PREFIX) {
            return PivotOutcome::Ignored;
        }
        match parse_menu_item(menu_item_id) {
            Some(section) => self.pivot(host, section, selection).await,
            None => {
                tracing::info!("unknown menu item: {menu_item_id}");
                PivotOutcome::Ignored
            }
        }
    }

    /// Validate `selection` for `section`, open every lookup and copy.
    pub async fn pivot<H: Host>(
        &self,
        host: &H,
        section: SectionKey,
        selection: &str,
    ) -> PivotOutcome {
        let Some(prepared) = prepare_pivot(section, selection) else {
            tracing::info!("invalid {}: {selection}", section.label());
            return PivotOutcome::Rejected {
                section,
                selection: selection.to_string(),
            };
        };

        let prefs = self.store.load_preferences().await;
        let section_prefs = prefs.section(section);

        let base = match host.active_tab_index().await {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!("no active tab, opening lookups at the front: {e:#}");
                0
            }
        };

        let mut tabs = Vec::new();
        let mut index = base + 1;
        for url in prepared.lookup_urls(section_prefs) {
            match host.open_tab(&url, index, false).await {
                Ok(()) => {
                    tracing::debug!(index, url = %url, "opened lookup");
                    tabs.push(url);
                    index += 1;
                }
                Err(e) => tracing::error!("failed to open {url}: {e:#}"),
            }
        }

        let mut copied = None;
        if let Some(text) = prepared.clipboard_text(section_prefs) {
            match host.write_clipboard(&text).await {
                Ok(()) => copied = Some(text),
                Err(e) => tracing::error!("clipboard write failed: {e:#}"),
            }
        }

        PivotOutcome::Opened {
            section,
            ioc: prepared.ioc,
            tabs,
            copied,
        }
    }
}
