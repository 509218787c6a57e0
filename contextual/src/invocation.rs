//! Leaf invocation: the unit handed to a collector.
//!
//! One invocation wraps the full `set_up → body → tear_down` composition
//! for a single `then`, plus its display name. The collector owns running
//! it and accounting for the outcome.

use crate::error::Result;

/// Scheduling weight hint a collector may use. Every tree leaf is
/// [`SizeHint::Small`]; the other variants exist for collector-side units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeHint {
    Small,
    Medium,
    Large,
}

pub(crate) type Thunk = Box<dyn Fn() -> Result<()>>;

/// One named, directly runnable leaf test.
pub struct LeafInvocation {
    name: String,
    thunk: Thunk,
}

impl LeafInvocation {
    pub(crate) fn new(name: String, thunk: Thunk) -> Self {
        Self { name, thunk }
    }

    /// Display name, unique within the tree:
    /// `"{case}::given {context chain}, then {then name}"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the composed fixtures and body.
    ///
    /// A failing assertion (or any panic) in a fixture or the body unwinds
    /// out of this call; `Err` means the shared state could not be bound.
    /// Either way the failure is attributable to exactly this leaf and the
    /// caller decides how to record it.
    pub fn run(&self) -> Result<()> {
        (self.thunk)()
    }

    /// Leaf invocations always count as one test.
    pub fn count(&self) -> usize {
        1
    }

    pub fn size_hint(&self) -> SizeHint {
        SizeHint::Small
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_counts_as_one_and_is_small() {
        let leaf = LeafInvocation::new("Case::given A, then b".into(), Box::new(|| Ok(())));
        assert_eq!(leaf.count(), 1);
        assert_eq!(leaf.size_hint(), SizeHint::Small);
        assert_eq!(leaf.name(), "Case::given A, then b");
        assert!(leaf.run().is_ok());
    }
}
