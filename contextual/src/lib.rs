//! Contextual test trees: nested `given`/`then` specifications with
//! fixtures composed along the ancestor chain.
//!
//! A [`case::RootSpec`] builds a tree of contexts once, eagerly, at
//! construction; each context carries its own `set_up`/`tear_down`
//! fixtures and named `then` leaves. Running the tree walks it depth-first
//! and submits one runnable [`invocation::LeafInvocation`] per leaf to a
//! [`collector::Collector`]. For every leaf, ancestor set_ups run
//! root-first before its own, and tear_downs mirror that order.
//!
//! All leaves share one mutable state instance (the root object). Nothing
//! is snapshotted between leaves; isolation comes only from explicit
//! `tear_down`s and re-running `set_up`s. The modules split as:
//!
//! - **[`tree`]**: the pure context arena (naming, counting, fixture
//!   composition). No execution policy.
//! - **[`builder`] / [`case`]**: the registration DSL and the root test
//!   case driving construction and the depth-first run.
//! - **[`binder`] / [`invocation`] / [`collector`]**: the execution
//!   boundary — binding leaves to the shared state and handing them to a
//!   collector that owns failure accounting.

pub mod binder;
pub mod builder;
pub mod case;
pub mod collector;
pub mod error;
pub mod exit_codes;
pub mod invocation;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod tree;
