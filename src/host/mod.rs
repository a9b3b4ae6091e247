//! Host framework seam for kisuite.
//!
//! kisuite does not run tests. It only decides how test bodies are grouped
//! before some host framework executes them. Everything it needs from that
//! host is captured by [`HostFramework`]: creating a named group, observing
//! which group a body is being applied to, and rewiring the parent and child
//! links of groups that already exist.
//!
//! Creating a group does not hand back the new group directly. The host runs
//! the body callback with the new group applied, and the only way to learn
//! which group that is, is the apply body hook. See
//! [`RegistrationBridge`](crate::RegistrationBridge) for the consumer side.
//!
//! [`GroupTree`] is an in-memory host that implements the trait. It models a
//! typical describe/it style framework and is what the tests register into.

use std::fmt::Debug;

use crate::SuiteError;

mod tree;
pub use tree::*;

/// Callback the host invokes every time it applies a body to a group.
pub type ApplyBodyHook<G> = Box<dyn FnMut(&G)>;

/// Callback run by [`HostFramework::create_group`] with the new group applied.
pub type GroupBody<'b, H> = dyn FnMut(&mut H) -> Result<(), SuiteError> + 'b;

/// The capabilities kisuite consumes from a host test framework.
///
/// The host owns its groups. kisuite only keeps cloned [`Self::Group`] handles
/// around, so a handle should be a cheap identifier rather than the group
/// itself.
pub trait HostFramework: Sized + 'static {
    /// Handle of a group registered with the host.
    type Group: Clone + PartialEq + Debug + 'static;

    /// Register a group called `name` under the host's current group and run
    /// `body` with the new group as the current group.
    ///
    /// Errors returned from `body` must be passed through unchanged.
    fn create_group(&mut self, name: &str, body: &mut GroupBody<'_, Self>)
    -> Result<(), SuiteError>;

    /// Install a hook that is called with the group whenever the host applies
    /// a body to it.
    ///
    /// This is the capability check for the host. The default implementation
    /// reports the host as incompatible.
    fn install_apply_body_hook(
        &mut self,
        hook: ApplyBodyHook<Self::Group>,
    ) -> Result<(), SuiteError> {
        let _ = hook;
        Err(SuiteError::IncompatibleHost {
            reason: "host does not expose an apply body hook".into(),
        })
    }

    /// The group `group` is currently attached to, `None` for the root.
    fn parent_group(&self, group: &Self::Group) -> Option<Self::Group>;

    /// Remove `child` from the child list of `parent`.
    ///
    /// Returns whether `child` was found.
    fn remove_child(&mut self, parent: &Self::Group, child: &Self::Group) -> bool;

    /// Append `child` to the child list of `parent`.
    fn add_child(&mut self, parent: &Self::Group, child: &Self::Group);

    /// Point the parent link of `child` at `parent`.
    fn set_parent_group(&mut self, child: &Self::Group, parent: &Self::Group);

    /// Recompute the cached full name of `group` from its ancestors.
    fn refresh_full_name(&mut self, group: &Self::Group);
}
