use crate::dom::DomNode;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Tags that are interactive on their own.
const ACTION_TAGS: [&str; 2] = ["a", "button"];

/// Attribute patterns that mark an element as a clickable affordance.
static ACTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["button", "btn", "link"]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

/// One step of an [`Action`](crate::Action) path: a child identified by tag
/// name and ordinal among same-tag siblings, with an attribute snapshot used
/// by the affordance heuristic.
///
/// The `hash` is an opaque dictionary key. It is derived once at
/// construction and passed through untouched on load, so blobs written under
/// an older formula keep their historical keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathNode {
    pub tag: String,
    pub index: usize,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub role: String,
    pub hash: String,
}

impl PathNode {
    pub fn new(
        tag: &str,
        index: usize,
        id: &str,
        class: &str,
        role: &str,
        hash: Option<&str>,
    ) -> Self {
        let hash = match hash {
            Some(h) => h.to_string(),
            None => format!("{tag}-{index}"),
        };
        Self {
            tag: tag.to_string(),
            index,
            id: id.to_string(),
            class: class.to_string(),
            role: role.to_string(),
            hash,
        }
    }

    /// Snapshot a live element. `sibling_index` is the element's ordinal
    /// among same-tag siblings under its parent, in document order,
    /// precomputed by the caller.
    pub fn from_element_and_index<N: DomNode>(el: &N, sibling_index: usize) -> Self {
        Self::new(
            &el.tag_name().to_lowercase(),
            sibling_index,
            &attr_lower(el, "id"),
            &attr_lower(el, "class"),
            &attr_lower(el, "role"),
            None,
        )
    }

    /// True when the node looks like something a user activates: an anchor
    /// or button tag, or an id/class/role matching an affordance pattern.
    pub fn is_action(&self) -> bool {
        if ACTION_TAGS.contains(&self.tag.as_str()) {
            return true;
        }
        ACTION_PATTERNS
            .iter()
            .any(|r| r.is_match(&self.id) || r.is_match(&self.class) || r.is_match(&self.role))
    }
}

fn attr_lower<N: DomNode>(el: &N, name: &str) -> String {
    el.attribute(name)
        .map(|v| v.to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::TreeNode;

    #[test]
    fn default_hash_is_tag_and_index() {
        let node = PathNode::new("div", 3, "", "", "", None);
        assert_eq!(node.hash, "div-3");
    }

    #[test]
    fn supplied_hash_wins_over_the_formula() {
        let node = PathNode::new("div", 3, "", "", "", Some("div-legacy"));
        assert_eq!(node.hash, "div-legacy");
    }

    #[test]
    fn action_detection_by_tag() {
        assert!(PathNode::new("a", 0, "", "", "", None).is_action());
        assert!(PathNode::new("button", 1, "", "", "", None).is_action());
        assert!(!PathNode::new("div", 0, "", "", "", None).is_action());
    }

    #[test]
    fn action_detection_by_attribute_pattern() {
        assert!(PathNode::new("div", 0, "", "header-btn primary", "", None).is_action());
        assert!(PathNode::new("span", 0, "nav-link", "", "", None).is_action());
        assert!(PathNode::new("div", 0, "", "", "button", None).is_action());
        assert!(!PathNode::new("div", 0, "header", "panel", "menu", None).is_action());
    }

    #[test]
    fn from_element_lowercases_and_defaults_missing_attributes() {
        let el = TreeNode::new("DIV").attr("class", "Nav-Button").attr("id", "Main");
        let node = PathNode::from_element_and_index(&el, 2);
        assert_eq!(node.tag, "div");
        assert_eq!(node.index, 2);
        assert_eq!(node.id, "main");
        assert_eq!(node.class, "nav-button");
        assert_eq!(node.role, "");
        assert_eq!(node.hash, "div-2");
    }

    #[test]
    fn blob_round_trip_preserves_stored_hash() {
        let node = PathNode::new("div", 1, "x", "y", "", Some("historic"));
        let json = serde_json::to_string(&node).unwrap();
        let back: PathNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
        assert_eq!(back.hash, "historic");
    }

    #[test]
    fn missing_attribute_fields_default_to_empty_on_load() {
        let back: PathNode =
            serde_json::from_str(r#"{"tag":"a","index":0,"hash":"a-0"}"#).unwrap();
        assert_eq!(back.id, "");
        assert_eq!(back.class, "");
        assert_eq!(back.role, "");
    }
}
