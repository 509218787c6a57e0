//! Collector boundary: execution and accounting of leaf invocations.
//!
//! The tree walk only submits invocations; a [`Collector`] decides when to
//! run them and how to record outcomes. [`TextCollector`] is the default:
//! it runs each leaf immediately, keeps a [`RunSummary`], and prints one
//! line per leaf plus a trailer to stdout. Diagnostics still go through
//! `tracing`, never into product output.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::exit_codes;
use crate::invocation::LeafInvocation;

/// Receiver of leaf invocations from a tree walk.
///
/// The collector owns executing each invocation (calling its `run()`),
/// catching failures, and aggregating results. A failure in one leaf must
/// not prevent later submissions from running.
pub trait Collector {
    fn accept(&mut self, invocation: LeafInvocation);
}

/// One recorded leaf failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafFailure {
    pub name: String,
    pub message: String,
}

/// Aggregated outcome of the invocations a collector has run so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failures: Vec<LeafFailure>,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Default collector: runs each leaf as it arrives and prints its outcome.
#[derive(Default)]
pub struct TextCollector {
    summary: RunSummary,
}

impl TextCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Stable process exit code for the run so far.
    pub fn exit_code(&self) -> i32 {
        if self.summary.all_passed() {
            exit_codes::OK
        } else {
            exit_codes::FAILED
        }
    }

    /// Print the `N tests, M failures` trailer.
    pub fn print_summary(&self) {
        println!(
            "{} tests, {} failures",
            self.summary.total,
            self.summary.failures.len()
        );
    }
}

impl Collector for TextCollector {
    fn accept(&mut self, invocation: LeafInvocation) {
        self.summary.total += invocation.count();
        match run_caught(&invocation) {
            Ok(()) => {
                self.summary.passed += 1;
                println!("PASS {}", invocation.name());
            }
            Err(message) => {
                tracing::debug!(leaf = invocation.name(), %message, "leaf failed");
                println!("FAIL {}: {}", invocation.name(), message);
                self.summary.failures.push(LeafFailure {
                    name: invocation.name().to_string(),
                    message,
                });
            }
        }
    }
}

/// Run one invocation, converting both unwinds (failing assertions) and
/// binding defects into a failure message scoped to that leaf.
pub(crate) fn run_caught(invocation: &LeafInvocation) -> std::result::Result<(), String> {
    match catch_unwind(AssertUnwindSafe(|| invocation.run())) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
