//! Binding of fixture and test bodies to the shared root state.
//!
//! Every fixture and leaf body executes against one mutable state instance
//! shared by the whole tree. [`StateHandle`] is the cloneable handle a leaf
//! invocation carries; the mutable borrow is resolved at invocation time,
//! not cached earlier. Execution is single-threaded (the walk is a chain of
//! direct calls), so the handle is `Rc<RefCell<_>>` rather than a lock.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Error, Result};

/// Cloneable handle to the shared root state.
pub struct StateHandle<S> {
    inner: Rc<RefCell<S>>,
}

impl<S> Clone for StateHandle<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S> StateHandle<S> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(state)),
        }
    }

    /// Take the mutable borrow of the shared state for the duration of `f`.
    ///
    /// Fails with [`Error::StateUnavailable`] when an enclosing invocation
    /// still holds the borrow. If `f` unwinds, the borrow is released with
    /// it, so later invocations bind normally.
    pub fn bind<T>(&self, f: impl FnOnce(&mut S) -> T) -> Result<T> {
        let mut state = self
            .inner
            .try_borrow_mut()
            .map_err(|_| Error::StateUnavailable)?;
        Ok(f(&mut state))
    }
}
