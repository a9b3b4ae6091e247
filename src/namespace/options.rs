/// What to do when a registration collides with an existing leaf body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateBodyPolicy {
    /// Fail the registration with
    /// [`SuiteError::DuplicateLeafBody`](crate::SuiteError::DuplicateLeafBody).
    #[default]
    Reject,

    /// Drop the conflicting registration and log a warning.
    Ignore,
}

/// Settings for a [`NamespaceRegistry`](crate::NamespaceRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceOptions {
    separator: char,
    duplicate_body: DuplicateBodyPolicy,
}

impl Default for NamespaceOptions {
    fn default() -> Self {
        Self {
            separator: '/',
            duplicate_body: DuplicateBodyPolicy::default(),
        }
    }
}

impl NamespaceOptions {
    pub fn with_separator(self, separator: char) -> Self {
        Self { separator, ..self }
    }

    pub fn with_duplicate_body_policy(self, duplicate_body: DuplicateBodyPolicy) -> Self {
        Self {
            duplicate_body,
            ..self
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn duplicate_body(&self) -> DuplicateBodyPolicy {
        self.duplicate_body
    }
}
