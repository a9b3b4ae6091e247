//! Specs registered into host groups.

use std::{borrow::Cow, fmt::Display};

/// A named test function living in a host group.
///
/// kisuite never runs specs itself, that is the job of whatever harness
/// consumes the host tree.
pub struct Spec {
    description: Cow<'static, str>,
    function: Box<dyn Fn() -> Result<(), String>>,
}

impl Spec {
    pub fn new<D, F, T>(description: D, f: F) -> Self
    where
        D: Into<Cow<'static, str>>,
        F: Fn() -> T + 'static,
        T: SpecOutcome,
    {
        Self {
            description: description.into(),
            function: Box::new(move || f().into_outcome()),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn run(&self) -> Result<(), String> {
        (self.function)()
    }
}

impl std::fmt::Debug for Spec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spec")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// What a spec function may return: `()` or a `Result` whose error prints.
pub trait SpecOutcome {
    fn into_outcome(self) -> Result<(), String>;
}

impl SpecOutcome for () {
    fn into_outcome(self) -> Result<(), String> {
        Ok(())
    }
}

impl<E: Display> SpecOutcome for Result<(), E> {
    fn into_outcome(self) -> Result<(), String> {
        self.map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_carry_the_error_text() {
        let passing = Spec::new("passes", || ());
        let failing = Spec::new("fails", || Err::<(), _>("no session"));

        assert_eq!(passing.run(), Ok(()));
        assert_eq!(failing.run(), Err("no session".to_owned()));
        assert_eq!(failing.description(), "fails");
    }
}
