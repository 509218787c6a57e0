//! Root test case: the `spec()` hook, eager tree construction, and the
//! depth-first run over the finished tree.

use std::rc::Rc;

use crate::binder::StateHandle;
use crate::builder::ContextBuilder;
use crate::collector::Collector;
use crate::error::{Error, Result};
use crate::invocation::LeafInvocation;
use crate::tree::{ContextId, ContextTree};

/// A contextual specification: initial state plus the tree-building hook.
///
/// Implementors describe their tree in [`RootSpec::spec`] using the
/// [`ContextBuilder`] DSL. The associated `State` is the single mutable
/// instance every fixture and leaf body in the tree executes against.
pub trait RootSpec {
    type State;

    /// Fresh state for one constructed [`TestCase`].
    fn initial_state(&self) -> Self::State;

    /// Build the tree. Must register at least one `given` (directly or
    /// transitively) before returning.
    fn spec(&self, cx: &mut ContextBuilder<'_, Self::State>);

    /// Name prefixed to every leaf's display name. Defaults to the short
    /// type name of the implementor.
    fn name(&self) -> String
    where
        Self: Sized,
    {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_string()
    }
}

/// A fully built, immutable test tree plus its shared state.
pub struct TestCase<S> {
    name: String,
    tree: Rc<ContextTree<S>>,
    state: StateHandle<S>,
}

impl<S: 'static> TestCase<S> {
    /// Build the tree by running `spec()` eagerly.
    ///
    /// Fails with [`Error::EmptySpec`] when the spec registers no
    /// descriptions; an empty tree never becomes runnable.
    pub fn new<R>(spec: R) -> Result<Self>
    where
        R: RootSpec<State = S>,
    {
        let name = spec.name();
        let mut tree = ContextTree::new();
        let root = tree.root();
        let mut cx = ContextBuilder::new(&mut tree, root);
        spec.spec(&mut cx);
        if tree.children(root).is_empty() {
            return Err(Error::EmptySpec { case: name });
        }
        tracing::debug!(case = %name, leaves = tree.count(root), "test tree built");
        Ok(Self {
            name,
            tree: Rc::new(tree),
            state: StateHandle::new(spec.initial_state()),
        })
    }

    /// Name of the test case, as used in leaf display names.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of leaves in the tree; equals the number of invocations one
    /// full [`TestCase::run`] submits.
    pub fn count(&self) -> usize {
        self.tree.count(self.tree.root())
    }

    /// Inspect the shared root state, e.g. after a run.
    pub fn with_state<T>(&self, f: impl FnOnce(&mut S) -> T) -> Result<T> {
        self.state.bind(f)
    }

    /// Walk the tree depth-first and submit one [`LeafInvocation`] per
    /// `then` to `collector`.
    ///
    /// At each node, local thens go out in insertion order before any child
    /// subtree; children follow declaration order. The collector is
    /// responsible for executing each invocation and recording failures, so
    /// a failing leaf never interrupts the walk.
    pub fn run(&self, collector: &mut dyn Collector) {
        self.run_node(self.tree.root(), collector);
    }

    fn run_node(&self, id: ContextId, collector: &mut dyn Collector) {
        let context_name = self.tree.context_name(id);
        for (then_name, body) in self.tree.thens(id) {
            let display_name =
                format!("{}::given {}, then {}", self.name, context_name, then_name);
            let tree = Rc::clone(&self.tree);
            let state = self.state.clone();
            let body = Rc::clone(body);
            let thunk = move || {
                state.bind(|s| {
                    tree.invoke_set_ups(id, s);
                    body(s);
                    tree.invoke_tear_downs(id, s);
                })
            };
            tracing::debug!(leaf = %display_name, "submitting leaf invocation");
            collector.accept(LeafInvocation::new(display_name, Box::new(thunk)));
        }
        for child in self.tree.children(id) {
            self.run_node(*child, collector);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;

    impl RootSpec for Empty {
        type State = ();

        fn initial_state(&self) {}

        fn spec(&self, _cx: &mut ContextBuilder<'_, ()>) {}
    }

    struct OneLeaf;

    impl RootSpec for OneLeaf {
        type State = ();

        fn initial_state(&self) {}

        fn spec(&self, cx: &mut ContextBuilder<'_, ()>) {
            cx.given("a context", |cx| {
                cx.then("a leaf", |_| {});
            });
        }
    }

    #[test]
    fn empty_spec_fails_at_construction() {
        let err = TestCase::new(Empty).err().expect("construction must fail");
        assert_eq!(
            err,
            Error::EmptySpec {
                case: "Empty".to_string()
            }
        );
    }

    #[test]
    fn default_name_is_the_short_type_name() {
        let case = TestCase::new(OneLeaf).expect("valid spec");
        assert_eq!(case.name(), "OneLeaf");
        assert_eq!(case.count(), 1);
    }

    #[test]
    fn run_submits_leaves_under_their_display_name() {
        let case = TestCase::new(OneLeaf).expect("valid spec");
        let mut collector = crate::test_support::RecordingCollector::new();
        case.run(&mut collector);
        assert_eq!(collector.names(), ["OneLeaf::given a context, then a leaf"]);
        assert_eq!(collector.failed(), 0);
    }
}
