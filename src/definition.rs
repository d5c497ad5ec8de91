//! The unvalidated description of a machine, as supplied to [`crate::TuringMachine::new`].

use std::collections::BTreeSet;

use crate::configuration::Configuration;
use crate::rules::{Instruction, Quadruple, Transition};
use crate::types::State;

/// Everything needed to build a machine.
///
/// The alphabet is kept as strings so that malformed entries (anything other than a single
/// character) can be represented and rejected during construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineDefinition {
    /// A human-readable name; empty for machines built in code.
    pub name: String,
    /// The declared states.
    pub states: BTreeSet<State>,
    /// The declared alphabet.
    pub alphabet: BTreeSet<String>,
    pub instructions: Vec<Instruction>,
    pub transitions: Vec<Transition>,
    /// The state every run starts in.
    pub initial_state: State,
    /// The configuration every run starts from.
    pub initial_configuration: Configuration,
}

impl MachineDefinition {
    /// Builds a definition whose instructions and transitions come from paired entries.
    pub fn from_quadruples<S, A>(
        states: impl IntoIterator<Item = S>,
        alphabet: impl IntoIterator<Item = A>,
        quadruples: impl IntoIterator<Item = Quadruple>,
        initial_state: impl Into<State>,
        initial_configuration: Configuration,
    ) -> Self
    where
        S: Into<State>,
        A: Into<String>,
    {
        let (instructions, transitions) = quadruples.into_iter().map(Quadruple::split).unzip();

        Self {
            name: String::new(),
            states: states.into_iter().map(Into::into).collect(),
            alphabet: alphabet.into_iter().map(Into::into).collect(),
            instructions,
            transitions,
            initial_state: initial_state.into(),
            initial_configuration,
        }
    }

    /// Sets the name of the definition.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
