//! Stable exit codes for embedders translating a run into process status.

/// Every submitted leaf passed.
pub const OK: i32 = 0;
/// At least one leaf failed, or a leaf could not bind the shared state.
pub const FAILED: i32 = 1;
