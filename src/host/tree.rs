use std::{borrow::Cow, fmt::Debug, mem};

use crate::{
    SuiteError,
    host::{ApplyBodyHook, GroupBody, HostFramework},
    spec::{Spec, SpecOutcome},
};

/// Identifier of a group inside a [`GroupTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl GroupId {
    /// The implicit top group every other group descends from.
    pub const ROOT: GroupId = GroupId(0);
}

#[derive(Debug)]
struct GroupData {
    description: String,
    parent: Option<GroupId>,
    children: Vec<GroupId>,
    specs: Vec<Spec>,
    full_name: String,
}

/// An in-memory describe/it style host framework.
///
/// Groups live in an arena and are addressed by [`GroupId`]. Like most
/// describe based frameworks, a new group is attached to whatever group is
/// current at the time of the call, and its body runs with the new group as
/// the current one.
///
/// Full names are cached when a group is created. Moving a group to another
/// parent does not touch that cache until
/// [`refresh_full_name`](HostFramework::refresh_full_name) is called.
pub struct GroupTree {
    groups: Vec<GroupData>,
    current: GroupId,
    apply_hook: Option<ApplyBodyHook<GroupId>>,
}

impl Debug for GroupTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupTree")
            .field("groups", &self.groups)
            .field("current", &self.current)
            .field("apply_hook", &self.apply_hook.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Default for GroupTree {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupTree {
    pub fn new() -> Self {
        Self {
            groups: vec![GroupData {
                description: String::new(),
                parent: None,
                children: Vec::new(),
                specs: Vec::new(),
                full_name: String::new(),
            }],
            current: GroupId::ROOT,
            apply_hook: None,
        }
    }

    pub fn root(&self) -> GroupId {
        GroupId::ROOT
    }

    /// The group new groups and specs are currently attached to.
    pub fn current_group(&self) -> GroupId {
        self.current
    }

    /// Open a plain nested group and run `body` inside of it.
    pub fn describe<F>(&mut self, name: &str, body: F) -> GroupId
    where
        F: FnOnce(&mut Self),
    {
        let id = self.push_group(name);
        self.add_specs_to_group(id, body);
        id
    }

    /// Register a spec in the current group.
    pub fn it<N, F, T>(&mut self, description: N, f: F)
    where
        N: Into<Cow<'static, str>>,
        F: Fn() -> T + 'static,
        T: SpecOutcome,
    {
        let spec = Spec::new(description, f);
        let current = self.current;
        self.group_mut(current).specs.push(spec);
    }

    pub fn parent(&self, id: GroupId) -> Option<GroupId> {
        self.group(id).parent
    }

    pub fn children(&self, id: GroupId) -> &[GroupId] {
        &self.group(id).children
    }

    pub fn top_level(&self) -> &[GroupId] {
        self.children(GroupId::ROOT)
    }

    pub fn description(&self, id: GroupId) -> &str {
        &self.group(id).description
    }

    /// The full name as cached on the group.
    pub fn full_name(&self, id: GroupId) -> &str {
        &self.group(id).full_name
    }

    /// Derive the full name from the current parent links.
    pub fn compute_full_name(&self, id: GroupId) -> String {
        let mut names = Vec::new();
        let mut cursor = Some(id);
        while let Some(id) = cursor {
            let group = self.group(id);
            if group.parent.is_some() {
                names.push(group.description.as_str());
            }
            cursor = group.parent;
        }
        names.reverse();
        names.join(" ")
    }

    pub fn specs(&self, id: GroupId) -> &[Spec] {
        &self.group(id).specs
    }

    /// Every spec reachable from the root, depth first, with its full name.
    pub fn all_specs(&self) -> Vec<(String, &Spec)> {
        let mut out = Vec::new();
        let mut stack = vec![GroupId::ROOT];
        while let Some(id) = stack.pop() {
            let prefix = self.compute_full_name(id);
            for spec in self.specs(id) {
                let full_name = match prefix.is_empty() {
                    true => spec.description().to_owned(),
                    false => format!("{prefix} {}", spec.description()),
                };
                out.push((full_name, spec));
            }
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    /// Render the reachable tree, one group or spec per line.
    ///
    /// Groups are indented by depth, specs are prefixed with `- `.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.outline_into(&mut out, GroupId::ROOT, 0);
        out
    }

    fn outline_into(&self, out: &mut String, id: GroupId, depth: usize) {
        for child in self.children(id) {
            out.push_str(&"  ".repeat(depth));
            out.push_str(self.description(*child));
            out.push('\n');
            for spec in self.specs(*child) {
                out.push_str(&"  ".repeat(depth + 1));
                out.push_str("- ");
                out.push_str(spec.description());
                out.push('\n');
            }
            self.outline_into(out, *child, depth + 1);
        }
    }

    /// Apply a definition to a group.
    ///
    /// This is the single step every body goes through, so it is where the
    /// apply body hook fires.
    fn add_specs_to_group<R>(
        &mut self,
        group: GroupId,
        definition: impl FnOnce(&mut Self) -> R,
    ) -> R {
        if let Some(hook) = self.apply_hook.as_mut() {
            hook(&group);
        }

        let previous = mem::replace(&mut self.current, group);
        let out = definition(self);
        self.current = previous;
        out
    }

    fn push_group(&mut self, name: &str) -> GroupId {
        let id = GroupId(self.groups.len());
        let parent = self.current;
        let parent_name = &self.group(parent).full_name;
        let full_name = match parent_name.is_empty() {
            true => name.to_owned(),
            false => format!("{parent_name} {name}"),
        };

        self.groups.push(GroupData {
            description: name.to_owned(),
            parent: Some(parent),
            children: Vec::new(),
            specs: Vec::new(),
            full_name,
        });
        self.group_mut(parent).children.push(id);
        id
    }

    fn group(&self, id: GroupId) -> &GroupData {
        &self.groups[id.0]
    }

    fn group_mut(&mut self, id: GroupId) -> &mut GroupData {
        &mut self.groups[id.0]
    }
}

impl HostFramework for GroupTree {
    type Group = GroupId;

    fn create_group(
        &mut self,
        name: &str,
        body: &mut GroupBody<'_, Self>,
    ) -> Result<(), SuiteError> {
        let id = self.push_group(name);
        self.add_specs_to_group(id, |host| body(host))
    }

    fn install_apply_body_hook(&mut self, hook: ApplyBodyHook<GroupId>) -> Result<(), SuiteError> {
        // Earlier hooks keep firing, the new one runs after them.
        let hook: ApplyBodyHook<GroupId> = match self.apply_hook.take() {
            Some(mut previous) => {
                let mut hook = hook;
                Box::new(move |group: &GroupId| {
                    previous(group);
                    hook(group);
                })
            }
            None => hook,
        };
        self.apply_hook = Some(hook);
        Ok(())
    }

    fn parent_group(&self, group: &GroupId) -> Option<GroupId> {
        self.parent(*group)
    }

    fn remove_child(&mut self, parent: &GroupId, child: &GroupId) -> bool {
        let children = &mut self.group_mut(*parent).children;
        match children.iter().position(|id| id == child) {
            Some(i) => {
                children.remove(i);
                true
            }
            None => false,
        }
    }

    fn add_child(&mut self, parent: &GroupId, child: &GroupId) {
        self.group_mut(*parent).children.push(*child);
    }

    fn set_parent_group(&mut self, child: &GroupId, parent: &GroupId) {
        self.group_mut(*child).parent = Some(*parent);
    }

    fn refresh_full_name(&mut self, group: &GroupId) {
        let full_name = self.compute_full_name(*group);
        self.group_mut(*group).full_name = full_name;
    }
}
