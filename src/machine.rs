//! This module defines the `TuringMachine` engine, which validates a machine definition, holds
//! the live and initial configurations, and executes single steps or whole runs until a halt.

use std::collections::BTreeSet;

use tracing::{debug, info, trace};

use crate::analyzer::validate;
use crate::configuration::Configuration;
use crate::definition::MachineDefinition;
use crate::program::Program;
use crate::trace::StepRecord;
use crate::types::{DefinitionError, State, Symbol, TuringMachineError};

/// A deterministic single-tape Turing machine.
///
/// The engine exclusively owns its program and both configurations. Callers only ever receive
/// copies of configurations, so nothing outside the engine can corrupt its state.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    name: String,
    states: BTreeSet<State>,
    alphabet: BTreeSet<Symbol>,
    initial_state: State,
    program: Program,
    initial: Configuration,
    configuration: Configuration,
    step_count: usize,
    halted: bool,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` from a `MachineDefinition`.
    ///
    /// # Arguments
    ///
    /// * `definition` - The `MachineDefinition` describing the machine.
    ///
    /// # Returns
    ///
    /// * `Ok(TuringMachine)` if the definition is valid.
    /// * `Err(TuringMachineError::Definition)` with the first violation otherwise.
    pub fn new(definition: MachineDefinition) -> Result<Self, TuringMachineError> {
        let alphabet = validate(&definition)?;
        let program = Program::new(definition.instructions, definition.transitions)?;

        info!(
            name = %definition.name,
            states = definition.states.len(),
            symbols = alphabet.len(),
            rules = program.len(),
            "Machine constructed"
        );

        Ok(Self {
            name: definition.name,
            states: definition.states,
            alphabet,
            initial_state: definition.initial_state,
            program,
            initial: definition.initial_configuration.clone(),
            configuration: definition.initial_configuration,
            step_count: 0,
            halted: false,
        })
    }

    /// Executes a single step.
    ///
    /// The instruction and the transition for the live `(state, symbol)` are applied to two
    /// independent copies of the live configuration. The next configuration takes its state
    /// from the transition copy and its tape and cursor from the instruction copy. Any error
    /// leaves the live configuration untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(StepRecord)` with the rules used and a copy of the resulting configuration.
    /// * `Err(TuringMachineError::StuckConfiguration)` if no rule matches the live pair.
    pub fn step(&mut self) -> Result<StepRecord, TuringMachineError> {
        let state = self.configuration.state();
        let symbol = self.configuration.symbol()?;

        let (instruction, transition) = self.program.lookup(state, symbol).ok_or_else(|| {
            TuringMachineError::StuckConfiguration {
                state: state.to_string(),
                symbol,
            }
        })?;

        let mut moved = self.configuration.clone();
        instruction.apply(&mut moved)?;

        let mut advanced = self.configuration.clone();
        transition.apply(&mut advanced)?;

        let (next_state, _, _) = advanced.into_parts();
        let (_, tape, cursor) = moved.into_parts();
        let record = StepRecord::new(
            transition.clone(),
            instruction.clone(),
            Configuration::new(next_state, tape, cursor),
        );

        self.configuration = record.configuration.clone();
        self.step_count += 1;
        self.halted = record.is_halt();

        trace!(
            step = self.step_count,
            instruction = %record.instruction,
            transition = %record.transition,
            "Step applied"
        );

        Ok(record)
    }

    /// Runs the machine until an instruction with the `Halt` action is applied.
    ///
    /// Returns every step record in execution order; the last one is the halting step. A
    /// machine that never reaches a `Halt` action never returns.
    pub fn run_until_halt(&mut self) -> Result<Vec<StepRecord>, TuringMachineError> {
        let mut records = Vec::new();

        loop {
            let record = self.step()?;
            let halted = record.is_halt();
            records.push(record);

            if halted {
                info!(
                    steps = records.len(),
                    state = self.configuration.state(),
                    cursor = self.configuration.cursor(),
                    "Machine halted"
                );
                return Ok(records);
            }
        }
    }

    /// Resets the machine to a fresh copy of its initial configuration.
    pub fn reset(&mut self) {
        debug!(steps = self.step_count, "Resetting machine");

        self.configuration = self.initial.clone();
        self.step_count = 0;
        self.halted = false;
    }

    /// Replaces the initial configuration, and resets the machine to it.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if `configuration` starts in the declared initial state.
    /// * `Err(TuringMachineError::Definition)` otherwise; the machine is left unchanged.
    pub fn set_initial_configuration(
        &mut self,
        configuration: Configuration,
    ) -> Result<(), TuringMachineError> {
        if configuration.state() != self.initial_state {
            return Err(DefinitionError::InitialConfigurationState {
                expected: self.initial_state.clone(),
                found: configuration.state().to_string(),
            }
            .into());
        }

        self.initial = configuration;
        self.reset();
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn states(&self) -> &BTreeSet<State> {
        &self.states
    }

    pub fn alphabet(&self) -> &BTreeSet<Symbol> {
        &self.alphabet
    }

    /// Returns the declared initial state.
    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Returns the live configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Returns the configuration captured at construction time.
    pub fn initial_configuration(&self) -> &Configuration {
        &self.initial
    }

    /// Returns the number of steps executed since construction or the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns `true` if the most recent step applied a `Halt` instruction.
    pub fn is_halted(&self) -> bool {
        self.halted
    }
}
