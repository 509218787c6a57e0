//! Registration DSL: `given`, `set_up`, `tear_down`, `then`.
//!
//! A [`ContextBuilder`] always targets one active context. `given` creates
//! a child context and runs its body with the child as the active target,
//! so registrations inside the body land on the child, not the caller.

use std::rc::Rc;

use crate::tree::{ContextId, ContextTree};

/// Registration handle for the currently active context.
pub struct ContextBuilder<'t, S> {
    tree: &'t mut ContextTree<S>,
    current: ContextId,
}

impl<'t, S> ContextBuilder<'t, S> {
    pub(crate) fn new(tree: &'t mut ContextTree<S>, current: ContextId) -> Self {
        Self { tree, current }
    }

    /// Declare a nested context labeled `label`.
    ///
    /// `body` runs immediately; `given`/`set_up`/`tear_down`/`then` calls
    /// inside it register against the new child. The child is appended to
    /// this context's children once `body` returns, so siblings keep their
    /// declaration order.
    pub fn given(&mut self, label: &str, body: impl FnOnce(&mut ContextBuilder<'_, S>)) {
        let child = self.tree.add_node(self.current, label);
        let mut cx = ContextBuilder::new(&mut *self.tree, child);
        body(&mut cx);
        self.tree.attach(self.current, child);
    }

    /// Append a set_up fixture to this context. For every leaf beneath this
    /// context it runs after all ancestor set_ups, in declaration order.
    pub fn set_up(&mut self, fixture: impl Fn(&mut S) + 'static) {
        self.tree.push_set_up(self.current, Rc::new(fixture));
    }

    /// Append a tear_down fixture to this context. For every leaf beneath
    /// this context it runs before any ancestor tear_down.
    pub fn tear_down(&mut self, fixture: impl Fn(&mut S) + 'static) {
        self.tree.push_tear_down(self.current, Rc::new(fixture));
    }

    /// Declare a named leaf test in this context. Redeclaring an existing
    /// name replaces the earlier body (last registration wins).
    pub fn then(&mut self, name: &str, body: impl Fn(&mut S) + 'static) {
        self.tree.register_then(self.current, name, Rc::new(body));
    }
}
