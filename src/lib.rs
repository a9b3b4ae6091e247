//! Namespaced test suites that merge across files.
//!
//! A suite is registered under a `/` separated path such as `"auth/login"`.
//! Each segment becomes a group in the host test framework, and paths that
//! share a prefix share those groups, no matter which file registered them or
//! in which order.
//!
//! ```
//! use kisuite::{NamespaceRegistry, host::GroupTree};
//!
//! let mut tree = GroupTree::new();
//! let registry = NamespaceRegistry::new(&mut tree)?;
//!
//! registry.suite(&mut tree, "auth/login", |ctx| {
//!     ctx.host().it("accepts a valid password", || ());
//! })?;
//! registry.suite(&mut tree, "auth/logout", |ctx| {
//!     ctx.host().it("clears the session", || ());
//! })?;
//!
//! assert_eq!(tree.top_level().len(), 1);
//! assert_eq!(
//!     tree.outline(),
//!     "auth\n  login\n    - accepts a valid password\n  logout\n    - clears the session\n"
//! );
//! # Ok::<(), kisuite::SuiteError>(())
//! ```

pub mod host;
pub use host::{ApplyBodyHook, GroupBody, HostFramework};

pub mod spec;

mod error;
pub use error::*;

mod bridge;
pub use bridge::*;

mod namespace;
pub use namespace::*;

#[cfg(test)]
mod test_support;
