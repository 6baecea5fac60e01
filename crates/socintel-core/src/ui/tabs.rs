//! Tab selector state for the settings surface.

/// Buttons and panels share tab ids; exactly the matching ones are active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSelector {
    buttons: Vec<String>,
    panels: Vec<String>,
    active: Option<String>,
}

impl TabSelector {
    /// Returns `None` when there are no buttons or no panels. The first
    /// button's tab starts active.
    pub fn new(buttons: Vec<String>, panels: Vec<String>) -> Option<Self> {
        if buttons.is_empty() || panels.is_empty() {
            return None;
        }
        let mut selector = Self {
            buttons,
            panels,
            active: None,
        };
        let first = selector.buttons[0].clone();
        selector.activate(&first);
        Some(selector)
    }

    /// Make `tab_id` active. An empty id is ignored.
    pub fn activate(&mut self, tab_id: &str) {
        if tab_id.is_empty() {
            return;
        }
        self.active = Some(tab_id.to_string());
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn button_active(&self, index: usize) -> bool {
        self.buttons.get(index).map(String::as_str) == self.active()
    }

    pub fn panel_active(&self, index: usize) -> bool {
        self.panels.get(index).map(String::as_str) == self.active()
    }

    /// Ids of the panels currently shown.
    pub fn active_panels(&self) -> impl Iterator<Item = &str> {
        self.panels
            .iter()
            .map(String::as_str)
            .filter(move |id| Some(*id) == self.active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_tab_active_initially() {
        let tabs = TabSelector::new(ids(&["ip", "url", "hash"]), ids(&["ip", "url", "hash"])).unwrap();
        assert_eq!(tabs.active(), Some("ip"));
        assert!(tabs.button_active(0));
        assert!(tabs.panel_active(0));
        assert!(!tabs.panel_active(1));
    }

    #[test]
    fn activate_switches_and_ignores_empty() {
        let mut tabs = TabSelector::new(ids(&["ip", "url"]), ids(&["ip", "url"])).unwrap();
        tabs.activate("url");
        tabs.activate("");
        assert_eq!(tabs.active_panels().collect::<Vec<_>>(), vec!["url"]);
    }

    #[test]
    fn unknown_tab_deactivates_everything() {
        let mut tabs = TabSelector::new(ids(&["ip"]), ids(&["ip"])).unwrap();
        tabs.activate("about");
        assert!(!tabs.button_active(0));
        assert_eq!(tabs.active_panels().count(), 0);
    }

    #[test]
    fn requires_buttons_and_panels() {
        assert!(TabSelector::new(vec![], ids(&["ip"])).is_none());
        assert!(TabSelector::new(ids(&["ip"]), vec![]).is_none());
    }
}
