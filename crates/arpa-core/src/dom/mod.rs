//! The DOM surface the core consumes.
//!
//! Hosts hand the core element handles implementing [`DomNode`]; nothing else
//! about the document is visible from here, which keeps the decision logic
//! testable without a browser.

pub mod tree;

pub use tree::TreeNode;

/// An element handle in a host document.
///
/// Handles are cheap to clone and compare by node identity, not by value:
/// two handles to the same element must report `same_node`, two handles to
/// structurally identical siblings must not.
pub trait DomNode: Clone {
    /// Tag name as reported by the host, in any case.
    fn tag_name(&self) -> String;

    /// Attribute value by name, `None` when absent.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Parent element, `None` at the top of the document.
    fn parent(&self) -> Option<Self>;

    /// Child elements in document order.
    fn children(&self) -> Vec<Self>;

    /// Node identity.
    fn same_node(&self, other: &Self) -> bool;
}
