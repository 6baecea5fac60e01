//! Settings surface model.
//!
//! Three repeated sections (ip, url, hash), each binding three checkboxes
//! and a list of URL template inputs to one [`PreferenceSection`].
//! Checkbox changes save at once; URL edits are validated per keystroke and
//! saved after the input has been idle for the debounce delay.
//!
//! [`PreferenceSection`]: crate::prefs::PreferenceSection

mod debounce;

pub use debounce::Debouncer;

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::ioc::is_valid_url;
use crate::prefs::{PreferenceDocument, PreferenceStore, SectionKey};

/// Default idle delay before a URL edit is persisted.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// One URL template text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlInput {
    pub value: String,
    /// Shown with an invalid marker; never saved while invalid.
    pub invalid: bool,
}

/// Blank inputs are accepted (reconciliation drops them on save).
pub fn url_input_is_valid(value: &str) -> bool {
    is_valid_url(value) || value.trim().is_empty()
}

struct PanelState {
    prefs: PreferenceDocument,
    inputs: HashMap<SectionKey, Vec<UrlInput>>,
}

pub struct SettingsPanel {
    store: Arc<PreferenceStore>,
    state: Arc<Mutex<PanelState>>,
    debouncer: Debouncer<(SectionKey, usize)>,
}

impl SettingsPanel {
    /// Load preferences, immediately re-save them so stored state is
    /// repaired, and populate one input per configured URL.
    pub async fn open(store: Arc<PreferenceStore>, debounce: Duration) -> Self {
        let loaded = store.load_preferences().await;
        let prefs = store.save_document(&loaded).await;

        let inputs = SectionKey::ALL
            .into_iter()
            .map(|key| {
                let list = prefs
                    .section(key)
                    .urls
                    .iter()
                    .map(|url| UrlInput {
                        value: url.clone(),
                        invalid: false,
                    })
                    .collect();
                (key, list)
            })
            .collect();

        Self {
            store,
            state: Arc::new(Mutex::new(PanelState { prefs, inputs })),
            debouncer: Debouncer::new(debounce),
        }
    }

    fn state(&self) -> MutexGuard<'_, PanelState> {
        lock_state(&self.state)
    }

    /// Snapshot of the in-memory document.
    pub fn prefs(&self) -> PreferenceDocument {
        self.state().prefs.clone()
    }

    /// A section's content is greyed out while it is inactive.
    pub fn section_disabled(&self, key: SectionKey) -> bool {
        !self.state().prefs.section(key).active
    }

    pub fn url_inputs(&self, key: SectionKey) -> Vec<UrlInput> {
        self.state().inputs.get(&key).cloned().unwrap_or_default()
    }

    pub async fn set_active(&self, key: SectionKey, checked: bool) {
        self.update_and_save(|prefs| prefs.section_mut(key).active = checked)
            .await;
    }

    pub async fn set_copy_to_clipboard(&self, key: SectionKey, checked: bool) {
        self.update_and_save(|prefs| prefs.section_mut(key).copy_to_clipboard = checked)
            .await;
    }

    /// Only the ip and url sections have a sanitise checkbox.
    pub async fn set_sanitise(&self, key: SectionKey, checked: bool) -> Result<()> {
        if !key.supports_sanitise() {
            bail!("the {} section has no sanitise option", key.label());
        }
        self.update_and_save(|prefs| prefs.section_mut(key).sanitise = Some(checked))
            .await;
        Ok(())
    }

    async fn update_and_save(&self, update: impl FnOnce(&mut PreferenceDocument)) {
        let snapshot = {
            let mut state = self.state();
            update(&mut state.prefs);
            state.prefs.clone()
        };
        self.store.save_document(&snapshot).await;
    }

    /// Append a blank input and return its index.
    pub fn add_url_input(&self, key: SectionKey) -> usize {
        let mut state = self.state();
        let list = state.inputs.entry(key).or_default();
        list.push(UrlInput {
            value: String::new(),
            invalid: false,
        });
        list.len() - 1
    }

    /// Record a keystroke in input `index`. Invalid values are only marked;
    /// valid ones (re)arm that input's debounced save of the whole list.
    /// Must be called from within a tokio runtime.
    pub fn edit_url(&self, key: SectionKey, index: usize, value: &str) -> Result<bool> {
        let valid = url_input_is_valid(value);
        {
            let mut state = self.state();
            let input = state
                .inputs
                .get_mut(&key)
                .and_then(|list| list.get_mut(index))
                .with_context(|| format!("no {} URL input at position {index}", key.label()))?;
            input.value = value.to_string();
            input.invalid = !valid;
        }
        if !valid {
            return Ok(false);
        }

        let store = Arc::clone(&self.store);
        let state = Arc::clone(&self.state);
        self.debouncer.schedule((key, index), async move {
            let snapshot = {
                let mut state = lock_state(&state);
                let values: Vec<String> = state
                    .inputs
                    .get(&key)
                    .map(|list| list.iter().map(|i| i.value.clone()).collect())
                    .unwrap_or_default();
                state.prefs.section_mut(key).urls = values;
                state.prefs.clone()
            };
            store.save_document(&snapshot).await;
        });
        Ok(true)
    }

    /// Wait for every pending debounced save to finish.
    pub async fn flush(&self) {
        self.debouncer.flush().await;
    }
}

fn lock_state(state: &Mutex<PanelState>) -> MutexGuard<'_, PanelState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::StorageArea;

    async fn panel() -> (Arc<PreferenceStore>, SettingsPanel) {
        let store = Arc::new(PreferenceStore::open_memory(StorageArea::Sync));
        let panel = SettingsPanel::open(Arc::clone(&store), DEFAULT_DEBOUNCE).await;
        (store, panel)
    }

    #[tokio::test]
    async fn open_repairs_storage_and_populates_inputs() {
        let (store, panel) = panel().await;
        assert_eq!(store.get_all().await.unwrap().len(), 3);
        assert_eq!(panel.url_inputs(SectionKey::Ip).len(), 3);
        assert_eq!(panel.url_inputs(SectionKey::Hash).len(), 2);
    }

    #[tokio::test]
    async fn checkbox_changes_save_immediately() {
        let (store, panel) = panel().await;
        panel.set_active(SectionKey::Url, false).await;
        panel.set_copy_to_clipboard(SectionKey::Ip, false).await;
        panel.set_sanitise(SectionKey::Ip, false).await.unwrap();

        let stored = store.load_preferences().await;
        assert!(!stored.url.active);
        assert!(!stored.ip.copy_to_clipboard);
        assert_eq!(stored.ip.sanitise, Some(false));
        assert!(panel.section_disabled(SectionKey::Url));
        assert!(!panel.section_disabled(SectionKey::Ip));
    }

    #[tokio::test]
    async fn hash_has_no_sanitise_checkbox() {
        let (_, panel) = panel().await;
        assert!(panel.set_sanitise(SectionKey::Hash, true).await.is_err());
    }

    #[tokio::test]
    async fn invalid_edit_is_marked_and_not_saved() {
        let (store, panel) = panel().await;
        assert!(!panel.edit_url(SectionKey::Ip, 0, "not a url").unwrap());
        panel.flush().await;

        assert!(panel.url_inputs(SectionKey::Ip)[0].invalid);
        assert_eq!(
            store.load_preferences().await.ip.urls,
            PreferenceDocument::default().ip.urls
        );
    }

    #[tokio::test]
    async fn edit_out_of_range_is_an_error() {
        let (_, panel) = panel().await;
        assert!(panel.edit_url(SectionKey::Hash, 7, "https://x.example.com").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_edits_saves_once() {
        let (store, panel) = panel().await;
        let mut rx = store.subscribe();

        let idx = panel.add_url_input(SectionKey::Hash);
        for partial in ["https://bazaar.abuse.ch", "https://bazaar.abuse.ch/s", "https://bazaar.abuse.ch/sample/{hash}"] {
            assert!(panel.edit_url(SectionKey::Hash, idx, partial).unwrap());
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(rx.try_recv().is_err(), "nothing saved before the idle delay");

        tokio::time::sleep(DEFAULT_DEBOUNCE).await;
        panel.flush().await;

        let change = rx.try_recv().unwrap();
        assert_eq!(change.key, "hash");
        assert!(rx.try_recv().is_err());
        assert_eq!(
            store.load_preferences().await.hash.urls,
            vec!["https://bazaar.abuse.ch/sample/{hash}".to_string()]
        );
    }
}
