use thiserror::Error;

/// Everything that can go wrong while registering namespaced suites.
///
/// All of these are load time failures. They surface synchronously at the
/// registration call that triggered them and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SuiteError {
    /// The host framework cannot hand out the group it is applying a body to.
    #[error("host framework is not compatible: {reason}")]
    IncompatibleHost { reason: String },

    /// The namespace path is empty or contains an empty segment.
    #[error("invalid namespace `{path}`: {reason}")]
    InvalidNamespace { path: String, reason: &'static str },

    /// A registration collides with a leaf body, or puts a leaf body onto a
    /// namespace that already has children.
    ///
    /// `existing` is the namespace owning the conflicting body or children.
    /// It equals `path` when the same namespace was registered twice.
    #[error("namespace `{path}` conflicts with existing namespace `{existing}`")]
    DuplicateLeafBody { path: String, existing: String },
}

impl SuiteError {
    pub(crate) fn invalid(path: &str, reason: &'static str) -> Self {
        Self::InvalidNamespace {
            path: path.to_owned(),
            reason,
        }
    }

    pub(crate) fn duplicate(path: &str, existing: &str) -> Self {
        Self::DuplicateLeafBody {
            path: path.to_owned(),
            existing: existing.to_owned(),
        }
    }
}
