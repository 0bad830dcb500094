use crate::dom::DomNode;
use crate::hash::hash_code;
use crate::path::PathNode;
use serde::{Deserialize, Serialize};

/// A recorded, replayable reference to one interactive element: the path of
/// [`PathNode`] steps from the document root down to the element.
///
/// Paths are strict and therefore brittle. They do not survive structural
/// page changes; a path that no longer matches resolves to nothing, and a
/// sibling shift may silently resolve to a different element at the same
/// ordinal. Both outcomes are part of the contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub path: Vec<PathNode>,
    pub hash: String,
}

impl Action {
    /// Build an action from a path, deriving the composite hash when none is
    /// supplied. Stored hashes are passed through untouched, identity is by
    /// hash alone.
    pub fn new(path: Vec<PathNode>, hash: Option<&str>) -> Self {
        let hash = match hash {
            Some(h) => h.to_string(),
            None => {
                let h: u64 = path.iter().map(|p| u64::from(hash_code(&p.hash))).sum();
                format!("action-{h}")
            }
        };
        Self { path, hash }
    }

    /// Snapshot the ancestor chain of `el` up to (and excluding) `root`,
    /// then truncate at the last interactive node of the root-to-leaf scan,
    /// the interactive ancestor closest to the click. Structure below it is
    /// discarded: arbitrary nested clicks collapse to their nearest
    /// meaningful ancestor. Returns `None` when no node on the chain is
    /// interactive; such a click is not recordable.
    pub fn from_element<N: DomNode>(el: &N, root: &N) -> Option<Self> {
        let mut path = Vec::new();
        let mut cur = el.clone();

        loop {
            if cur.same_node(root) {
                break;
            }
            let Some(parent) = cur.parent() else { break };

            let tag = cur.tag_name().to_lowercase();
            let mut sib_index = 0;
            let mut count = 0;
            for sib in parent.children() {
                if sib.tag_name().to_lowercase() == tag {
                    if sib.same_node(&cur) {
                        sib_index = count;
                    }
                    count += 1;
                }
            }

            path.push(PathNode::from_element_and_index(&cur, sib_index));
            cur = parent;
        }
        path.reverse();

        let last = path.iter().rposition(PathNode::is_action)?;
        path.truncate(last + 1);
        Some(Self::new(path, None))
    }

    /// Re-resolve the path against a live document, walking child-by-child
    /// from `root` and counting only same-tag children at each step.
    /// All-or-nothing: any missing step yields `None`, never a partial match.
    pub fn target<N: DomNode>(&self, root: &N) -> Option<N> {
        let mut el = root.clone();

        for node in &self.path {
            let mut next = None;
            let mut index = 0;
            for child in el.children() {
                if child.tag_name().to_lowercase() == node.tag {
                    if index == node.index {
                        next = Some(child);
                        break;
                    }
                    index += 1;
                }
            }
            el = next?;
        }

        Some(el)
    }
}
