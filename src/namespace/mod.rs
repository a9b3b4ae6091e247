//! The namespace tree.
//!
//! A namespace path like `"suite/login"` names a nested host group, one group
//! per segment. Every registration under a path that was seen before reuses
//! the same tree node, so suites declared in different files end up in the
//! same host groups instead of each file building its own hierarchy.
//!
//! Host groups are created lazily. Registering a path attaches its body to the
//! terminal node and then materializes the path's top-level node, which walks
//! down creating whatever host groups do not exist yet. Since nodes that are
//! already materialized are walked again, children added later still get their
//! groups.
//!
//! The host creates a group under whatever group is current at the time. When
//! a new child shows up below an ancestor that was materialized by an earlier
//! registration, the host puts the child at the top level. The registry then
//! moves it below its ancestor, which is called re-parenting.

use tracing::{debug, trace, warn};

use crate::{HostFramework, RegistrationBridge, SuiteError};

mod body;
pub use body::*;

mod node;
pub use node::*;

mod options;
pub use options::*;

mod path;
use path::NamespacePath;

/// Owns the namespace tree of one test loading session.
///
/// A registry is bound to a single host and is not thread safe. Bodies can
/// register further suites through their [`SuiteContext`] while they run.
#[derive(Debug)]
pub struct NamespaceRegistry<H: HostFramework> {
    root: Namespace<H>,
    bridge: RegistrationBridge<H::Group>,
    options: NamespaceOptions,
}

impl<H: HostFramework> NamespaceRegistry<H> {
    /// Create a registry for `host` with the default options.
    ///
    /// Fails if the host cannot report the group it applies a body to.
    pub fn new(host: &mut H) -> Result<Self, SuiteError> {
        Self::with_options(host, NamespaceOptions::default())
    }

    pub fn with_options(host: &mut H, options: NamespaceOptions) -> Result<Self, SuiteError> {
        let bridge = RegistrationBridge::install(host)?;
        Ok(Self {
            root: Namespace::root(),
            bridge,
            options,
        })
    }

    pub fn options(&self) -> &NamespaceOptions {
        &self.options
    }

    /// The namespaces registered at the top level.
    pub fn top_level(&self) -> Vec<Namespace<H>> {
        self.root.children()
    }

    /// Get the node for `path`, creating it and its ancestors if needed.
    ///
    /// Repeated calls with the same path return the same node. Nodes created
    /// here get no host group until a body is registered at or below them.
    pub fn resolve_path(&self, path: &str) -> Result<Namespace<H>, SuiteError> {
        let path = NamespacePath::parse(path, self.options.separator())?;
        let (_, node) = self.resolve(&path);
        Ok(node)
    }

    /// Register a leaf body under `path`.
    ///
    /// Returns the host group of the path's first segment.
    pub fn suite<F, T>(&self, host: &mut H, path: &str, specs: F) -> Result<H::Group, SuiteError>
    where
        F: FnOnce(&mut SuiteContext<'_, H>) -> T + 'static,
        T: Into<BodyResult>,
    {
        self.register(host, path, SuiteBody::specs(specs))
    }

    /// Register a container under `path` whose sub-namespaces are declared by
    /// `f` relative to `path`.
    pub fn namespace<F>(&self, host: &mut H, path: &str, f: F) -> Result<H::Group, SuiteError>
    where
        F: FnOnce(&mut NamespaceScope<H>) + 'static,
    {
        self.register(host, path, SuiteBody::namespaces(f))
    }

    pub fn register(
        &self,
        host: &mut H,
        path: &str,
        body: SuiteBody<H>,
    ) -> Result<H::Group, SuiteError> {
        let top = self.attach(path, body)?;
        self.materialize(host, &top, None)
    }

    /// Register every declaration, stopping at the first error.
    pub fn register_all<'d, I>(&self, host: &mut H, decls: I) -> Result<(), SuiteError>
    where
        I: IntoIterator<Item = &'d SuiteDecl<H>>,
    {
        for decl in decls {
            self.suite(host, decl.path, decl.specs)?;
        }
        Ok(())
    }

    /// Put `body` into the tree without touching the host.
    ///
    /// Container bodies are flattened into their leaves and every leaf is
    /// checked before the first node is created, so a failed registration
    /// leaves the tree as it was. Returns the top-level node of `path`.
    fn attach(&self, path: &str, body: SuiteBody<H>) -> Result<Namespace<H>, SuiteError> {
        let separator = self.options.separator();
        let parsed = NamespacePath::parse(path, separator)?;

        if let Some(existing) = self.find_conflict(&parsed, body.is_specs()) {
            self.on_conflict(path, &existing)?;
            // The conflicting node exists, so its top-level ancestor does too.
            return self
                .root
                .child(parsed.top_key())
                .ok_or_else(|| SuiteError::duplicate(path, &existing));
        }

        let mut leaves = Vec::new();
        self.flatten(path.to_owned(), body, &mut leaves)?;
        let leaves = self.screen(leaves)?;

        let (top, _) = self.resolve(&parsed);
        for (path, specs) in leaves {
            let parsed = NamespacePath::parse(&path, separator)?;
            let (_, node) = self.resolve(&parsed);
            node.set_body(specs);
        }
        Ok(top)
    }

    /// Run container bodies and collect the leaf bodies they declare, with
    /// their absolute paths.
    fn flatten(
        &self,
        path: String,
        body: SuiteBody<H>,
        leaves: &mut Vec<(String, SpecsFn<H>)>,
    ) -> Result<(), SuiteError> {
        let separator = self.options.separator();
        NamespacePath::parse(&path, separator)?;

        match body {
            SuiteBody::Specs(specs) => leaves.push((path, specs)),
            SuiteBody::Namespaces(f) => {
                let mut scope = NamespaceScope::new();
                f(&mut scope);
                for (relative, body) in scope.into_entries() {
                    self.flatten(format!("{path}{separator}{relative}"), body, leaves)?;
                }
            }
        }
        Ok(())
    }

    /// Check leaves against the tree and against each other.
    ///
    /// Returns the leaves that may be attached.
    fn screen(
        &self,
        leaves: Vec<(String, SpecsFn<H>)>,
    ) -> Result<Vec<(String, SpecsFn<H>)>, SuiteError> {
        let separator = self.options.separator();
        let mut accepted: Vec<(String, SpecsFn<H>)> = Vec::new();
        for (path, specs) in leaves {
            let parsed = NamespacePath::parse(&path, separator)?;
            let sibling = accepted.iter().map(|(other, _)| other).find(|other| {
                parsed.has_key(other)
                    || NamespacePath::parse(other, separator).is_ok_and(|o| o.has_key(&path))
            });

            let conflict = self.find_conflict(&parsed, true).or_else(|| sibling.cloned());
            match conflict {
                Some(existing) => self.on_conflict(&path, &existing)?,
                None => accepted.push((path, specs)),
            }
        }
        Ok(accepted)
    }

    fn on_conflict(&self, path: &str, existing: &str) -> Result<(), SuiteError> {
        match self.options.duplicate_body() {
            DuplicateBodyPolicy::Reject => Err(SuiteError::duplicate(path, existing)),
            DuplicateBodyPolicy::Ignore => {
                warn!(path, existing, "dropping registration that conflicts with a leaf body");
                Ok(())
            }
        }
    }

    /// Find the path of an existing node that a body may not be attached
    /// below or onto.
    ///
    /// Leaf nodes take neither children nor a second body, and nodes with
    /// children take no leaf body.
    fn find_conflict(&self, path: &NamespacePath<'_>, leaf: bool) -> Option<String> {
        let last = path.len() - 1;
        let mut cursor = self.root.clone();
        for (i, (key, _)) in path.iter().enumerate() {
            let node = cursor.child(key)?;
            if node.is_leaf() || (i == last && leaf && node.has_children()) {
                return Some(node.path());
            }
            cursor = node;
        }
        None
    }

    /// Walk `path` from the root, creating missing nodes.
    ///
    /// Returns the top-level node and the terminal node.
    fn resolve(&self, path: &NamespacePath<'_>) -> (Namespace<H>, Namespace<H>) {
        let mut top = None;
        let mut cursor = self.root.clone();
        for (key, segment) in path.iter() {
            let (node, created) = cursor.get_or_create_child(key, segment);
            if created {
                debug!(path = key, "created namespace");
            }
            top.get_or_insert_with(|| node.clone());
            cursor = node;
        }

        // `NamespacePath` always has at least one segment.
        (top.unwrap_or_else(|| cursor.clone()), cursor)
    }

    /// Make sure `node` and everything below it exist on the host.
    ///
    /// The host group is created at most once and the body runs at most once,
    /// parentage and children are reconciled on every call.
    fn materialize(
        &self,
        host: &mut H,
        node: &Namespace<H>,
        parent: Option<&Namespace<H>>,
    ) -> Result<H::Group, SuiteError> {
        if let Some(group) = node.host_group() {
            self.reconcile_parent(host, node, &group, parent);
            self.expand(host, node)?;
            return Ok(group);
        }

        let _ = self.bridge.take_active();
        host.create_group(&node.display_name(), &mut |host: &mut H| {
            let group = self
                .bridge
                .take_active()
                .ok_or_else(|| SuiteError::IncompatibleHost {
                    reason: format!("no group was captured while creating `{}`", node.path()),
                })?;
            debug!(path = %node.path(), ?group, "materialized namespace");
            node.set_host_group(group.clone());

            self.reconcile_parent(host, node, &group, parent);
            self.expand(host, node)
        })?;

        node.host_group().ok_or_else(|| SuiteError::IncompatibleHost {
            reason: format!("host never applied a body to `{}`", node.path()),
        })
    }

    fn reconcile_parent(
        &self,
        host: &mut H,
        node: &Namespace<H>,
        group: &H::Group,
        parent: Option<&Namespace<H>>,
    ) {
        let Some(parent_group) = parent.and_then(Namespace::host_group) else {
            return;
        };

        let current = host.parent_group(group);
        if current.as_ref() == Some(&parent_group) {
            return;
        }

        debug!(path = %node.path(), from = ?current, to = ?parent_group, "re-parenting host group");
        if let Some(old) = &current {
            host.remove_child(old, group);
        }
        host.add_child(&parent_group, group);
        host.set_parent_group(group, &parent_group);
        host.refresh_full_name(group);
    }

    fn expand(&self, host: &mut H, node: &Namespace<H>) -> Result<(), SuiteError> {
        if let Some(body) = node.take_body() {
            trace!(path = %node.path(), "running leaf body");
            let mut ctx = SuiteContext {
                registry: self,
                host,
                namespace: node.clone(),
            };
            return body.call_body(&mut ctx).0;
        }

        for child in node.children() {
            if child.holds_body() {
                self.materialize(host, &child, Some(node))?;
            }
        }
        Ok(())
    }
}
