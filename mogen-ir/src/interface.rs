//! Flattened interfaces and their methods.

use crate::types::Signature;

/// One method of a flattened interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub sig: Signature,
}

impl Method {
    pub fn new(name: impl Into<String>, sig: Signature) -> Self {
        Self { name: name.into(), sig }
    }
}

/// A fully resolved interface: embedded interfaces already merged in.
///
/// The resolver hands methods over sorted by name, and the generator relies
/// on that order for stable output. `Interface` itself imposes nothing; it
/// keeps whatever order it was built with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Interface {
    methods: Vec<Method>,
}

impl Interface {
    pub fn new(methods: Vec<Method>) -> Self {
        Self { methods }
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }
}

impl FromIterator<Method> for Interface {
    fn from_iter<I: IntoIterator<Item = Method>>(iter: I) -> Self {
        Self { methods: iter.into_iter().collect() }
    }
}
