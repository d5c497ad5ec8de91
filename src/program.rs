//! This module defines the `Program`, the set of instructions and transitions of a machine
//! keyed by `(state, symbol)`.

use std::collections::HashMap;

use crate::rules::{Instruction, Quadruple, Transition};
use crate::types::{DefinitionError, State, Symbol};

/// The paired instructions and transitions of a machine.
///
/// Rules are stored per state, then per symbol, so a lookup is a pair of hash probes and a
/// duplicated key is detected while the program is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    instructions: HashMap<State, HashMap<Symbol, Instruction>>,
    transitions: HashMap<State, HashMap<Symbol, Transition>>,
}

impl Program {
    /// Builds a program from separate instruction and transition sets.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if every key appears exactly once in each set.
    /// * `Err(DefinitionError::DuplicateRule)` if a key repeats within one set.
    /// * `Err(DefinitionError::UnpairedRule)` if a key appears in only one of the sets.
    pub fn new(
        instructions: impl IntoIterator<Item = Instruction>,
        transitions: impl IntoIterator<Item = Transition>,
    ) -> Result<Self, DefinitionError> {
        let mut program = Self::default();

        for instruction in instructions {
            let state = instruction.state().to_string();
            let symbol = instruction.symbol();
            let rules = program.instructions.entry(state.clone()).or_default();
            if rules.insert(symbol, instruction).is_some() {
                return Err(DefinitionError::DuplicateRule {
                    kind: "instruction",
                    state,
                    symbol,
                });
            }
        }

        for transition in transitions {
            let state = transition.state().to_string();
            let symbol = transition.symbol();
            let rules = program.transitions.entry(state.clone()).or_default();
            if rules.insert(symbol, transition).is_some() {
                return Err(DefinitionError::DuplicateRule {
                    kind: "transition",
                    state,
                    symbol,
                });
            }
        }

        program.check_pairing()?;

        Ok(program)
    }

    /// Builds a program from paired entries, splitting each into its two halves.
    pub fn from_quadruples(
        quadruples: impl IntoIterator<Item = Quadruple>,
    ) -> Result<Self, DefinitionError> {
        let (instructions, transitions): (Vec<_>, Vec<_>) =
            quadruples.into_iter().map(Quadruple::split).unzip();

        Self::new(instructions, transitions)
    }

    /// Finds the instruction and transition for `(state, symbol)`.
    pub fn lookup(&self, state: &str, symbol: Symbol) -> Option<(&Instruction, &Transition)> {
        Some((self.instruction(state, symbol)?, self.transition(state, symbol)?))
    }

    pub fn instruction(&self, state: &str, symbol: Symbol) -> Option<&Instruction> {
        self.instructions.get(state)?.get(&symbol)
    }

    pub fn transition(&self, state: &str, symbol: Symbol) -> Option<&Transition> {
        self.transitions.get(state)?.get(&symbol)
    }

    /// Returns the number of `(state, symbol)` keys in the program.
    pub fn len(&self) -> usize {
        self.instructions.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns all keys of the program, sorted by state then symbol.
    pub fn keys(&self) -> Vec<(State, Symbol)> {
        sorted_keys(&self.instructions)
    }

    /// Returns every rule as a paired entry, in key order.
    pub fn quadruples(&self) -> Vec<Quadruple> {
        self.keys()
            .into_iter()
            .filter_map(|(state, symbol)| {
                let (instruction, transition) = self.lookup(&state, symbol)?;
                Some(Quadruple::new(
                    state.as_str(),
                    symbol,
                    instruction.action(),
                    transition.next_state(),
                ))
            })
            .collect()
    }

    /// Reports the smallest unpaired key, instructions first.
    fn check_pairing(&self) -> Result<(), DefinitionError> {
        if let Some((state, symbol)) = sorted_keys(&self.instructions)
            .into_iter()
            .find(|(state, symbol)| self.transition(state, *symbol).is_none())
        {
            return Err(DefinitionError::UnpairedRule {
                kind: "instruction",
                missing: "transition",
                state,
                symbol,
            });
        }

        if let Some((state, symbol)) = sorted_keys(&self.transitions)
            .into_iter()
            .find(|(state, symbol)| self.instruction(state, *symbol).is_none())
        {
            return Err(DefinitionError::UnpairedRule {
                kind: "transition",
                missing: "instruction",
                state,
                symbol,
            });
        }

        Ok(())
    }
}

fn sorted_keys<R>(rules: &HashMap<State, HashMap<Symbol, R>>) -> Vec<(State, Symbol)> {
    let mut keys: Vec<(State, Symbol)> = rules
        .iter()
        .flat_map(|(state, rules)| rules.keys().map(move |&symbol| (state.clone(), symbol)))
        .collect();

    keys.sort();
    keys
}
