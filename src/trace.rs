//! Step records and the ordered trace of a run.

use serde::Serialize;

use crate::configuration::Configuration;
use crate::rules::{Action, Instruction, Transition};

/// The outcome of one step: the rules that were applied and the resulting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub transition: Transition,
    pub instruction: Instruction,
    pub configuration: Configuration,
}

impl StepRecord {
    pub fn new(
        transition: Transition,
        instruction: Instruction,
        configuration: Configuration,
    ) -> Self {
        Self {
            transition,
            instruction,
            configuration,
        }
    }

    /// Returns `true` if this step applied a `Halt` instruction.
    pub fn is_halt(&self) -> bool {
        self.instruction.action() == Action::Halt
    }
}

/// A complete run: the starting configuration followed by every step taken from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trace {
    pub initial: Configuration,
    pub steps: Vec<StepRecord>,
}

impl Trace {
    pub fn new(initial: Configuration, steps: Vec<StepRecord>) -> Self {
        Self { initial, steps }
    }

    /// Iterates over the initial configuration and then each step's configuration, in order.
    pub fn configurations(&self) -> impl Iterator<Item = &Configuration> {
        std::iter::once(&self.initial).chain(self.steps.iter().map(|step| &step.configuration))
    }

    /// Returns the configuration the run ended in.
    pub fn final_configuration(&self) -> &Configuration {
        self.steps
            .last()
            .map_or(&self.initial, |step| &step.configuration)
    }

    /// Returns `true` if the last step applied a `Halt` instruction.
    pub fn halted(&self) -> bool {
        self.steps.last().is_some_and(StepRecord::is_halt)
    }

    /// Returns the number of steps in the run.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
