//! Toolkit-independent settings UI logic: which options are visible and
//! which tab is shown. Rendering is left to the caller.

pub mod hierarchy;
pub mod tabs;

pub use hierarchy::{visible_set, CheckboxNode};
pub use tabs::TabSelector;

use crate::prefs::{PreferenceSection, SectionKey};

/// Option hierarchy for one settings section: the active toggle at level 1,
/// the clipboard toggle beneath it, and sanitise beneath that.
pub fn section_options(key: SectionKey, section: &PreferenceSection) -> Vec<CheckboxNode> {
    let mut nodes = vec![
        CheckboxNode::new("active", 1, section.active),
        CheckboxNode::new("copy to clipboard", 2, section.copy_to_clipboard),
    ];
    if key.supports_sanitise() {
        nodes.push(CheckboxNode::new("sanitise", 3, section.sanitise_enabled()));
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::PreferenceDocument;

    #[test]
    fn unchecked_toggles_hide_nested_options() {
        let mut doc = PreferenceDocument::default();
        doc.ip.active = false;
        doc.ip.copy_to_clipboard = false;
        let nodes = section_options(SectionKey::Ip, &doc.ip);
        assert_eq!(visible_set(&nodes), vec![true, false, false]);
    }

    #[test]
    fn hash_section_has_no_sanitise_option() {
        let doc = PreferenceDocument::default();
        let nodes = section_options(SectionKey::Hash, &doc.hash);
        assert_eq!(nodes.len(), 2);
        assert_eq!(visible_set(&nodes), vec![true, true]);
    }
}
