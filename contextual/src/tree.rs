//! Context tree arena: nodes, naming, counting, and fixture composition.
//!
//! All nodes of a tree live in one [`ContextTree`] arena and refer to each
//! other by [`ContextId`]. The `children` lists are the only ownership
//! edges; `parent` is a plain back-reference used for naming and fixture
//! composition. The root is the arena node with no label and no parent.
//!
//! The tree is built once, during `spec()`, and never mutated afterward;
//! execution only reads it.

use std::rc::Rc;

/// Fixture callable, run against the shared root state.
pub type Fixture<S> = Rc<dyn Fn(&mut S)>;

/// Leaf test body, run against the shared root state.
pub type TestBody<S> = Rc<dyn Fn(&mut S)>;

/// Index of a node within its [`ContextTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextId(usize);

/// One context: a `given` label, local fixtures, named leaf tests, and
/// child contexts.
struct ContextNode<S> {
    /// `given` label; `None` only for the root.
    label: Option<String>,
    parent: Option<ContextId>,
    set_ups: Vec<Fixture<S>>,
    tear_downs: Vec<Fixture<S>>,
    /// Insertion order is execution order. Re-registering a name replaces
    /// the body in place, keeping the original position.
    thens: Vec<(String, TestBody<S>)>,
    children: Vec<ContextId>,
}

impl<S> ContextNode<S> {
    fn new(label: Option<String>, parent: Option<ContextId>) -> Self {
        Self {
            label,
            parent,
            set_ups: Vec::new(),
            tear_downs: Vec::new(),
            thens: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// Arena holding every context of one test tree.
pub struct ContextTree<S> {
    nodes: Vec<ContextNode<S>>,
}

impl<S> ContextTree<S> {
    /// Create a tree containing only the (unlabeled, parentless) root.
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![ContextNode::new(None, None)],
        }
    }

    /// Id of the root context.
    pub(crate) fn root(&self) -> ContextId {
        ContextId(0)
    }

    /// Allocate a new description node under `parent`.
    ///
    /// The node is not yet reachable from `parent`; [`Self::attach`] makes
    /// it so once its registration body has run.
    pub(crate) fn add_node(&mut self, parent: ContextId, label: &str) -> ContextId {
        let id = ContextId(self.nodes.len());
        self.nodes
            .push(ContextNode::new(Some(label.to_string()), Some(parent)));
        id
    }

    /// Append `child` to `parent`'s children, fixing declaration order.
    pub(crate) fn attach(&mut self, parent: ContextId, child: ContextId) {
        self.nodes[parent.0].children.push(child);
    }

    pub(crate) fn push_set_up(&mut self, id: ContextId, fixture: Fixture<S>) {
        self.nodes[id.0].set_ups.push(fixture);
    }

    pub(crate) fn push_tear_down(&mut self, id: ContextId, fixture: Fixture<S>) {
        self.nodes[id.0].tear_downs.push(fixture);
    }

    /// Register `name → body`, overwriting in place if `name` exists.
    pub(crate) fn register_then(&mut self, id: ContextId, name: &str, body: TestBody<S>) {
        let node = &mut self.nodes[id.0];
        if let Some(slot) = node.thens.iter_mut().find(|(existing, _)| existing.as_str() == name) {
            tracing::debug!(name, "replacing previously registered then");
            slot.1 = body;
        } else {
            node.thens.push((name.to_string(), body));
        }
    }

    pub(crate) fn children(&self, id: ContextId) -> &[ContextId] {
        &self.nodes[id.0].children
    }

    pub(crate) fn thens(&self, id: ContextId) -> &[(String, TestBody<S>)] {
        &self.nodes[id.0].thens
    }

    /// Human-readable context chain, e.g. `"A and B"` for a `given` nested
    /// inside another. The root contributes nothing, so first-level
    /// descriptions are unqualified.
    pub(crate) fn context_name(&self, id: ContextId) -> String {
        let node = &self.nodes[id.0];
        let Some(label) = &node.label else {
            return String::new();
        };
        match node.parent {
            Some(parent) => {
                let parent_name = self.context_name(parent);
                if parent_name.is_empty() {
                    label.clone()
                } else {
                    format!("{parent_name} and {label}")
                }
            }
            None => label.clone(),
        }
    }

    /// Number of leaves reachable from `id`: local thens plus the sum over
    /// all children.
    pub(crate) fn count(&self, id: ContextId) -> usize {
        let node = &self.nodes[id.0];
        node.thens.len()
            + node
                .children
                .iter()
                .map(|child| self.count(*child))
                .sum::<usize>()
    }

    /// Run set_up fixtures for a leaf owned by `id`: ancestors first (root
    /// towards `id`), then this node's own fixtures, in declaration order.
    pub(crate) fn invoke_set_ups(&self, id: ContextId, state: &mut S) {
        let node = &self.nodes[id.0];
        if let Some(parent) = node.parent {
            self.invoke_set_ups(parent, state);
        }
        for set_up in &node.set_ups {
            set_up(state);
        }
    }

    /// Mirror image of [`Self::invoke_set_ups`]: this node's own tear_downs
    /// first, then ancestors towards the root.
    pub(crate) fn invoke_tear_downs(&self, id: ContextId, state: &mut S) {
        let node = &self.nodes[id.0];
        for tear_down in &node.tear_downs {
            tear_down(state);
        }
        if let Some(parent) = node.parent {
            self.invoke_tear_downs(parent, state);
        }
    }
}
