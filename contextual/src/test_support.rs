//! Test-only collaborators for exercising context trees.

use crate::collector::{Collector, run_caught};
use crate::invocation::LeafInvocation;

/// Outcome of one recorded leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed(String),
}

/// Collector that executes each leaf as it arrives and records
/// `(name, outcome)` in submission order, without printing.
#[derive(Default)]
pub struct RecordingCollector {
    pub records: Vec<(String, Outcome)>,
}

impl RecordingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaf display names, in submission order.
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn passed(&self) -> usize {
        self.records
            .iter()
            .filter(|(_, outcome)| *outcome == Outcome::Passed)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.passed()
    }
}

impl Collector for RecordingCollector {
    fn accept(&mut self, invocation: LeafInvocation) {
        let outcome = match run_caught(&invocation) {
            Ok(()) => Outcome::Passed,
            Err(message) => Outcome::Failed(message),
        };
        self.records.push((invocation.name().to_string(), outcome));
    }
}
