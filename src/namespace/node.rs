use std::{cell::RefCell, collections::HashMap, fmt::Debug, rc::Rc};

use crate::{HostFramework, namespace::body::SpecsFn};

struct NamespaceNode<H: HostFramework> {
    display_name: String,
    path: String,
    body: Option<SpecsFn<H>>,
    body_consumed: bool,
    children: HashMap<String, Namespace<H>>,
    /// Child keys in the order they were first declared.
    order: Vec<String>,
    host_group: Option<H::Group>,
}

/// Shared handle to a node of the namespace tree.
///
/// Handles compare by identity through [`Namespace::ptr_eq`]. A node is
/// materialized exactly when it holds a host group.
pub struct Namespace<H: HostFramework>(Rc<RefCell<NamespaceNode<H>>>);

impl<H: HostFramework> Clone for Namespace<H> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<H: HostFramework> Debug for Namespace<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("Namespace")
            .field("path", &node.path)
            .field("leaf", &(node.body.is_some() || node.body_consumed))
            .field("host_group", &node.host_group)
            .field("children", &node.order)
            .finish()
    }
}

impl<H: HostFramework> Namespace<H> {
    pub(crate) fn root() -> Self {
        Self::new(String::new(), String::new())
    }

    fn new(display_name: String, path: String) -> Self {
        Self(Rc::new(RefCell::new(NamespaceNode {
            display_name,
            path,
            body: None,
            body_consumed: false,
            children: HashMap::new(),
            order: Vec::new(),
            host_group: None,
        })))
    }

    pub fn display_name(&self) -> String {
        self.0.borrow().display_name.clone()
    }

    /// The full path of this node, empty for the root.
    pub fn path(&self) -> String {
        self.0.borrow().path.clone()
    }

    pub fn host_group(&self) -> Option<H::Group> {
        self.0.borrow().host_group.clone()
    }

    pub fn is_materialized(&self) -> bool {
        self.0.borrow().host_group.is_some()
    }

    /// Whether a leaf body was ever attached, consumed or not.
    pub fn is_leaf(&self) -> bool {
        let node = self.0.borrow();
        node.body.is_some() || node.body_consumed
    }

    pub fn is_body_consumed(&self) -> bool {
        self.0.borrow().body_consumed
    }

    pub fn has_children(&self) -> bool {
        !self.0.borrow().children.is_empty()
    }

    /// Snapshot of the children in declaration order, which is also the order
    /// they are materialized in.
    pub fn children(&self) -> Vec<Namespace<H>> {
        let node = self.0.borrow();
        node.order
            .iter()
            .filter_map(|key| node.children.get(key).cloned())
            .collect()
    }

    /// Whether a leaf body was attached to this node or anywhere below it.
    ///
    /// Nodes without one only exist because a path was resolved, they get no
    /// host group.
    pub fn holds_body(&self) -> bool {
        self.is_leaf() || self.children().iter().any(Namespace::holds_body)
    }

    /// Look up a direct child by its full path.
    pub fn child(&self, path: &str) -> Option<Namespace<H>> {
        self.0.borrow().children.get(path).cloned()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the child stored under `path`, creating it if needed.
    ///
    /// The flag is `true` if the child was created by this call.
    pub(crate) fn get_or_create_child(&self, path: &str, display_name: &str) -> (Self, bool) {
        if let Some(child) = self.child(path) {
            return (child, false);
        }

        let child = Self::new(display_name.to_owned(), path.to_owned());
        let mut node = self.0.borrow_mut();
        node.children.insert(path.to_owned(), child.clone());
        node.order.push(path.to_owned());
        (child, true)
    }

    pub(crate) fn set_body(&self, body: SpecsFn<H>) {
        self.0.borrow_mut().body = Some(body);
    }

    /// Take the body out for its one and only invocation.
    pub(crate) fn take_body(&self) -> Option<SpecsFn<H>> {
        let mut node = self.0.borrow_mut();
        let body = node.body.take();
        if body.is_some() {
            node.body_consumed = true;
        }
        body
    }

    pub(crate) fn set_host_group(&self, group: H::Group) {
        self.0.borrow_mut().host_group = Some(group);
    }
}
