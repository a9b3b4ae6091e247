//! Recovering the group a host is applying a body to.
//!
//! [`HostFramework::create_group`] does not return the new group. The only
//! moment the group is observable is when the host applies the body callback
//! to it. The bridge installs an apply body hook that writes that group into a
//! single slot, and the registry takes it out again first thing inside the
//! callback. Capture and use are strictly nested, so one slot is enough even
//! when bodies register further suites.

use std::{cell::RefCell, rc::Rc};

use tracing::trace;

use crate::{HostFramework, SuiteError};

#[derive(Debug)]
pub struct RegistrationBridge<G> {
    active: Rc<RefCell<Option<G>>>,
}

impl<G: Clone + std::fmt::Debug + 'static> RegistrationBridge<G> {
    /// Install the capture hook into `host`.
    ///
    /// Fails with [`SuiteError::IncompatibleHost`] when the host cannot
    /// provide the hook, which should abort loading right away.
    pub fn install<H>(host: &mut H) -> Result<Self, SuiteError>
    where
        H: HostFramework<Group = G>,
    {
        let active = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&active);
        host.install_apply_body_hook(Box::new(move |group: &G| {
            trace!(?group, "captured active group");
            *slot.borrow_mut() = Some(group.clone());
        }))?;
        Ok(Self { active })
    }

    /// Take the most recently captured group, leaving the slot empty.
    pub fn take_active(&self) -> Option<G> {
        self.active.borrow_mut().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        host::{GroupId, GroupTree},
        test_support::Hookless,
    };

    #[test]
    fn captures_group_being_applied() {
        let mut tree = GroupTree::new();
        let bridge = RegistrationBridge::install(&mut tree).unwrap();
        assert_eq!(bridge.take_active(), None);

        let mut seen = None;
        let created = tree.describe("a", |_| seen = bridge.take_active());
        assert_eq!(seen, Some(created));
        assert_eq!(bridge.take_active(), None);
    }

    #[test]
    fn nested_groups_do_not_leak_into_outer_capture() {
        let mut tree = GroupTree::new();
        let bridge = RegistrationBridge::install(&mut tree).unwrap();

        let mut outer = None;
        let mut inner = None;
        tree.describe("outer", |tree| {
            outer = bridge.take_active();
            tree.describe("inner", |_| inner = bridge.take_active());
        });

        assert!(outer.is_some());
        assert_ne!(outer, inner);
        assert_ne!(outer, Some(GroupId::ROOT));
        assert_eq!(tree.parent(inner.unwrap()), outer);
    }

    #[test]
    fn hookless_host_is_rejected() {
        let mut host = Hookless::default();
        let err = RegistrationBridge::install(&mut host).unwrap_err();
        assert!(matches!(err, SuiteError::IncompatibleHost { .. }));
    }
}
