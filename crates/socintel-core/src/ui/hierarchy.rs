//! Checkbox hierarchy visibility.
//!
//! Options are laid out as a flat list where each entry carries a nesting
//! level; children follow their parent. Levels above 1 are hidden unless
//! the option directly above them in the hierarchy is checked.

/// One labelled option in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxNode {
    pub label: String,
    /// Nesting level; `None` when the entry carries no (parseable) level.
    pub level: Option<u32>,
    /// Checkbox state; `None` when the entry has no checkbox.
    pub checked: Option<bool>,
}

impl CheckboxNode {
    pub fn new(label: impl Into<String>, level: u32, checked: bool) -> Self {
        Self {
            label: label.into(),
            level: Some(level),
            checked: Some(checked),
        }
    }
}

/// Visibility of each node, index-aligned with `nodes`.
///
/// Entries deeper than level 1 start hidden; everything else keeps its
/// (visible) default. Each checked node then reveals the following entries
/// exactly one level deeper, stopping at the first entry at its own level
/// or shallower. Level-less entries are skipped during that scan.
pub fn visible_set(nodes: &[CheckboxNode]) -> Vec<bool> {
    let mut visible: Vec<bool> = nodes
        .iter()
        .map(|n| !matches!(n.level, Some(level) if level > 1))
        .collect();

    for (index, node) in nodes.iter().enumerate() {
        let (Some(level), Some(true)) = (node.level, node.checked) else {
            continue;
        };
        for (offset, child) in nodes[index + 1..].iter().enumerate() {
            let Some(child_level) = child.level else {
                continue;
            };
            if child_level <= level {
                break;
            }
            if child_level == level + 1 {
                visible[index + 1 + offset] = true;
            }
        }
    }

    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(level: u32, checked: bool) -> CheckboxNode {
        CheckboxNode::new(format!("l{level}"), level, checked)
    }

    #[test]
    fn nested_levels_hidden_by_default() {
        let nodes = [node(1, false), node(2, true), node(3, true)];
        assert_eq!(visible_set(&nodes), vec![true, false, true]);
    }

    #[test]
    fn checked_parent_reveals_direct_children_only() {
        let nodes = [node(1, true), node(2, false), node(3, false), node(2, false), node(1, false)];
        assert_eq!(visible_set(&nodes), vec![true, true, false, true, true]);
    }

    #[test]
    fn scan_stops_at_sibling_and_skips_levelless() {
        let nodes = [
            node(1, true),
            CheckboxNode {
                label: "note".into(),
                level: None,
                checked: None,
            },
            node(2, false),
            node(1, false),
            node(2, false),
        ];
        assert_eq!(visible_set(&nodes), vec![true, true, true, true, false]);
    }
}
