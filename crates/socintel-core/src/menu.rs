//! Selection context-menu registry.
//!
//! One item per active preference section, re-registered whenever the
//! stored section changes.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::prefs::{SectionKey, StorageArea, StorageChange};

/// Prefix shared by every item id (`soc-intel-ip`, ...).
pub const MENU_ID_PREFIX: &str = "soc-intel-";

/// Context in which items are offered.
pub const SELECTION_CONTEXT: &str = "selection";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub context: &'static str,
}

pub fn menu_item_id(key: SectionKey) -> String {
    format!("{MENU_ID_PREFIX}{}", key.as_str())
}

/// Section for a clicked item id, `None` for ids that are not ours.
pub fn parse_menu_item(id: &str) -> Option<SectionKey> {
    id.strip_prefix(MENU_ID_PREFIX)?.parse().ok()
}

fn active_flag(value: Option<&Value>) -> bool {
    value
        .and_then(|v| v.get("active"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Registered items keyed by id.
#[derive(Debug, Default)]
pub struct ContextMenu {
    items: BTreeMap<String, MenuItem>,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the item for `key`, then re-create it when `active`.
    pub fn update_item(&mut self, key: SectionKey, active: bool) {
        let id = menu_item_id(key);
        self.items.remove(&id);
        if active {
            self.items.insert(
                id.clone(),
                MenuItem {
                    id,
                    title: key.label().to_string(),
                    context: SELECTION_CONTEXT,
                },
            );
        }
        tracing::debug!(section = key.as_str(), active, "context menu updated");
    }

    /// Initial registration from the raw stored blob. Sections missing from
    /// storage are left untouched; a missing `active` counts as inactive.
    pub fn sync_from_storage(&mut self, stored: &Map<String, Value>) {
        for key in SectionKey::ALL {
            if let Some(value) = stored.get(key.as_str()) {
                self.update_item(key, active_flag(Some(value)));
            }
        }
    }

    /// React to a store change. Changes from the other area are ignored.
    pub fn apply_change(&mut self, change: &StorageChange, expected_area: StorageArea) {
        if change.area != expected_area {
            return;
        }
        if let Ok(key) = change.key.parse::<SectionKey>() {
            self.update_item(key, active_flag(change.new_value.as_ref()));
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.values()
    }

    pub fn contains(&self, key: SectionKey) -> bool {
        self.items.contains_key(&menu_item_id(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn change(area: StorageArea, key: &str, new_value: Value) -> StorageChange {
        StorageChange {
            area,
            key: key.to_string(),
            old_value: None,
            new_value: Some(new_value),
        }
    }

    #[test]
    fn ids_roundtrip() {
        assert_eq!(menu_item_id(SectionKey::Hash), "soc-intel-hash");
        assert_eq!(parse_menu_item("soc-intel-url"), Some(SectionKey::Url));
        assert_eq!(parse_menu_item("soc-intel-domain"), None);
        assert_eq!(parse_menu_item("other-ip"), None);
    }

    #[test]
    fn sync_registers_active_sections_only() {
        let stored = json!({
            "ip": {"active": true},
            "hash": {"active": false},
            "url": {}
        });
        let mut menu = ContextMenu::new();
        menu.sync_from_storage(stored.as_object().unwrap());
        assert!(menu.contains(SectionKey::Ip));
        assert!(!menu.contains(SectionKey::Hash));
        assert!(!menu.contains(SectionKey::Url));

        let ip = menu.items().next().unwrap();
        assert_eq!(ip.title, "IP");
        assert_eq!(ip.context, "selection");
    }

    #[test]
    fn change_from_other_area_is_ignored() {
        let mut menu = ContextMenu::new();
        menu.apply_change(
            &change(StorageArea::Local, "ip", json!({"active": true})),
            StorageArea::Sync,
        );
        assert!(!menu.contains(SectionKey::Ip));

        menu.apply_change(
            &change(StorageArea::Sync, "ip", json!({"active": true})),
            StorageArea::Sync,
        );
        assert!(menu.contains(SectionKey::Ip));
    }

    #[test]
    fn deactivation_removes_item_and_unknown_keys_are_skipped() {
        let mut menu = ContextMenu::new();
        menu.update_item(SectionKey::Url, true);
        menu.apply_change(
            &change(StorageArea::Sync, "url", json!({"active": false})),
            StorageArea::Sync,
        );
        menu.apply_change(
            &change(StorageArea::Sync, "theme", json!({"active": true})),
            StorageArea::Sync,
        );
        assert_eq!(menu.items().count(), 0);
    }
}
