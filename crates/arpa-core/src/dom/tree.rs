//! Owned in-memory DOM tree.
//!
//! Serves hosts that feed the core a document snapshot instead of a live
//! page, and doubles as the test document for everything in this workspace.

use super::DomNode;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

struct NodeData {
    tag: String,
    attrs: RefCell<HashMap<String, String>>,
    parent: RefCell<Weak<NodeData>>,
    children: RefCell<Vec<TreeNode>>,
}

/// A node in an owned DOM tree. Clones are handles to the same node.
#[derive(Clone)]
pub struct TreeNode(Rc<NodeData>);

impl TreeNode {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(NodeData {
            tag: tag.to_string(),
            attrs: RefCell::new(HashMap::new()),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        }))
    }

    /// Builder-style attribute setter.
    pub fn attr(self, name: &str, value: &str) -> Self {
        self.0
            .attrs
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Append `child` as the last child of this node.
    pub fn append(&self, child: &TreeNode) {
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
    }

    /// Remove this node (and everything under it) from its parent.
    pub fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent
                .0
                .children
                .borrow_mut()
                .retain(|c| !Rc::ptr_eq(&c.0, &self.0));
            *self.0.parent.borrow_mut() = Weak::new();
        }
    }
}

impl DomNode for TreeNode {
    fn tag_name(&self) -> String {
        self.0.tag.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.attrs.borrow().get(name).cloned()
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent.borrow().upgrade().map(TreeNode)
    }

    fn children(&self) -> Vec<Self> {
        self.0.children.borrow().clone()
    }

    fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.0.tag)?;
        for (k, v) in self.0.attrs.borrow().iter() {
            write!(f, " {k}={v:?}")?;
        }
        write!(f, "> ({} children)", self.0.children.borrow().len())
    }
}
