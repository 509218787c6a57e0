//! Error types for the contextual test tree.
//!
//! Structural defects (authoring errors caught while building a tree) and
//! binding defects (the shared state could not be resolved at invocation
//! time) are typed here. Failing assertions are not an `Error`: they unwind
//! out of a leaf invocation and are caught by the collector.

use thiserror::Error;

/// Result type alias for contextual operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Defects raised by tree construction and leaf execution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// `spec()` completed without registering a single description.
    ///
    /// An empty tree is an authoring error, so construction aborts rather
    /// than producing a runnable case with zero leaves.
    #[error("no descriptions were registered in `{case}::spec()`")]
    EmptySpec {
        /// Name of the root test case whose spec was empty.
        case: String,
    },

    /// The shared root state could not be borrowed for a leaf invocation.
    ///
    /// This happens only when an enclosing invocation still holds the
    /// state, e.g. a leaf body that re-enters `run`. It is an integration
    /// defect and fails the leaf loudly instead of defaulting silently.
    #[error("shared root state is unavailable: an enclosing invocation still holds it")]
    StateUnavailable,
}
