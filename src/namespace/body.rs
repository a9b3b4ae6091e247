use std::fmt::Debug;

use crate::{HostFramework, NamespaceRegistry, SuiteError, namespace::node::Namespace};

/// The outcome of a leaf body.
///
/// Bodies may return `()` or a `Result<(), SuiteError>`, the latter lets
/// them use `?` on nested registrations.
#[derive(Debug)]
pub struct BodyResult(pub Result<(), SuiteError>);

impl From<()> for BodyResult {
    fn from(_: ()) -> Self {
        Self(Ok(()))
    }
}

impl From<Result<(), SuiteError>> for BodyResult {
    fn from(v: Result<(), SuiteError>) -> Self {
        Self(v)
    }
}

/// A leaf body that can be called once.
pub trait SpecsBody<H: HostFramework> {
    fn call_body(self: Box<Self>, ctx: &mut SuiteContext<'_, H>) -> BodyResult;
}

impl<H, F, T> SpecsBody<H> for F
where
    H: HostFramework,
    F: FnOnce(&mut SuiteContext<'_, H>) -> T,
    T: Into<BodyResult>,
{
    fn call_body(self: Box<Self>, ctx: &mut SuiteContext<'_, H>) -> BodyResult {
        (*self)(ctx).into()
    }
}

pub type SpecsFn<H> = Box<dyn SpecsBody<H>>;

pub type NamespacesFn<H> = Box<dyn FnOnce(&mut NamespaceScope<H>)>;

/// What gets registered under a namespace path.
pub enum SuiteBody<H: HostFramework> {
    /// A leaf body that registers specs into the namespace's host group.
    Specs(SpecsFn<H>),

    /// A container body that registers sub-namespaces relative to the path.
    ///
    /// It runs right away during registration, the namespace itself stays a
    /// pure container.
    Namespaces(NamespacesFn<H>),
}

impl<H: HostFramework> SuiteBody<H> {
    pub fn specs<F, T>(f: F) -> Self
    where
        F: FnOnce(&mut SuiteContext<'_, H>) -> T + 'static,
        T: Into<BodyResult>,
    {
        Self::Specs(Box::new(f))
    }

    pub fn namespaces<F>(f: F) -> Self
    where
        F: FnOnce(&mut NamespaceScope<H>) + 'static,
    {
        Self::Namespaces(Box::new(f))
    }

    pub fn is_specs(&self) -> bool {
        matches!(self, Self::Specs(_))
    }
}

impl<H: HostFramework> Debug for SuiteBody<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Specs(_) => write!(f, "Specs(...)"),
            Self::Namespaces(_) => write!(f, "Namespaces(...)"),
        }
    }
}

/// Handed to a leaf body while its namespace's host group is current.
pub struct SuiteContext<'r, H: HostFramework> {
    pub(crate) registry: &'r NamespaceRegistry<H>,
    pub(crate) host: &'r mut H,
    pub(crate) namespace: Namespace<H>,
}

impl<'r, H: HostFramework> SuiteContext<'r, H> {
    /// The host, for registering specs or plain nested groups.
    pub fn host(&mut self) -> &mut H {
        &mut *self.host
    }

    /// The namespace this body belongs to.
    pub fn namespace(&self) -> &Namespace<H> {
        &self.namespace
    }

    /// The host group the body is applied to.
    pub fn group(&self) -> Option<H::Group> {
        self.namespace.host_group()
    }

    /// Register another suite from inside this body.
    ///
    /// `path` is absolute, just like at the top level.
    pub fn suite<F, T>(&mut self, path: &str, specs: F) -> Result<H::Group, SuiteError>
    where
        F: FnOnce(&mut SuiteContext<'_, H>) -> T + 'static,
        T: Into<BodyResult>,
    {
        self.registry.suite(self.host, path, specs)
    }

    pub fn register(&mut self, path: &str, body: SuiteBody<H>) -> Result<H::Group, SuiteError> {
        self.registry.register(self.host, path, body)
    }
}

/// Collects registrations relative to a container namespace.
pub struct NamespaceScope<H: HostFramework> {
    entries: Vec<(String, SuiteBody<H>)>,
}

impl<H: HostFramework> NamespaceScope<H> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn suite<F, T>(&mut self, path: &str, specs: F) -> &mut Self
    where
        F: FnOnce(&mut SuiteContext<'_, H>) -> T + 'static,
        T: Into<BodyResult>,
    {
        self.entries.push((path.to_owned(), SuiteBody::specs(specs)));
        self
    }

    pub fn namespace<F>(&mut self, path: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut NamespaceScope<H>) + 'static,
    {
        self.entries
            .push((path.to_owned(), SuiteBody::namespaces(f)));
        self
    }

    pub(crate) fn into_entries(self) -> Vec<(String, SuiteBody<H>)> {
        self.entries
    }
}

/// A statically declared suite.
///
/// Test files collect these in a `linkme` distributed slice and the loader
/// hands the whole slice to [`NamespaceRegistry::register_all`]. The slice has
/// no defined order, which is fine since registration is order independent.
pub struct SuiteDecl<H: HostFramework> {
    pub path: &'static str,
    pub specs: fn(&mut SuiteContext<'_, H>),
}

impl<H: HostFramework> SuiteDecl<H> {
    pub const fn new(path: &'static str, specs: fn(&mut SuiteContext<'_, H>)) -> Self {
        Self { path, specs }
    }
}

impl<H: HostFramework> Debug for SuiteDecl<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteDecl")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
