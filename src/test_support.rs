use std::{cell::Cell, rc::Rc};

use tracing::Level;
use tracing_subscriber::fmt::Subscriber;

use crate::{
    ApplyBodyHook, GroupBody, HostFramework, SuiteContext, SuiteError,
    host::{GroupId, GroupTree},
};

pub fn init_tracing() {
    let _ = Subscriber::builder()
        .with_max_level(Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Default, Clone)]
pub struct Counter(Rc<Cell<usize>>);

impl Counter {
    pub fn hit(&self) {
        self.0.set(self.0.get() + 1);
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

/// A leaf body that counts its calls and registers one spec.
pub fn counting(
    counter: &Counter,
    spec: &'static str,
) -> impl FnOnce(&mut SuiteContext<'_, GroupTree>) + 'static {
    let counter = counter.clone();
    move |ctx| {
        counter.hit();
        ctx.host().it(spec, || ());
    }
}

/// `(full name, parent full name)` of every reachable group, sorted.
pub fn linkage(tree: &GroupTree) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut stack = vec![GroupId::ROOT];
    while let Some(id) = stack.pop() {
        for child in tree.children(id) {
            let parent = tree.parent(*child).map(|p| tree.compute_full_name(p));
            out.push((tree.compute_full_name(*child), parent.unwrap_or_default()));
            stack.push(*child);
        }
    }
    out.sort();
    out
}

pub fn spec_names(tree: &GroupTree) -> Vec<String> {
    tree.all_specs().into_iter().map(|(name, _)| name).collect()
}

/// A host without an apply body hook.
#[derive(Debug, Default)]
pub struct Hookless;

impl HostFramework for Hookless {
    type Group = usize;

    fn create_group(&mut self, _: &str, body: &mut GroupBody<'_, Self>) -> Result<(), SuiteError> {
        body(self)
    }

    fn parent_group(&self, _: &usize) -> Option<usize> {
        None
    }

    fn remove_child(&mut self, _: &usize, _: &usize) -> bool {
        false
    }

    fn add_child(&mut self, _: &usize, _: &usize) {}

    fn set_parent_group(&mut self, _: &usize, _: &usize) {}

    fn refresh_full_name(&mut self, _: &usize) {}
}

/// A host that accepts the hook but never calls it.
#[derive(Debug, Default)]
pub struct Silent;

impl HostFramework for Silent {
    type Group = usize;

    fn create_group(&mut self, _: &str, body: &mut GroupBody<'_, Self>) -> Result<(), SuiteError> {
        body(self)
    }

    fn install_apply_body_hook(
        &mut self,
        _: ApplyBodyHook<usize>,
    ) -> Result<(), SuiteError> {
        Ok(())
    }

    fn parent_group(&self, _: &usize) -> Option<usize> {
        None
    }

    fn remove_child(&mut self, _: &usize, _: &usize) -> bool {
        false
    }

    fn add_child(&mut self, _: &usize, _: &usize) {}

    fn set_parent_group(&mut self, _: &usize, _: &usize) {}

    fn refresh_full_name(&mut self, _: &usize) {}
}
