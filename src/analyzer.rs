//! This module provides the checks run against a `MachineDefinition` before an engine is built,
//! and a non-fatal analysis that reports gaps a machine may run into at execution time.

use std::collections::{BTreeSet, HashSet};

use crate::definition::MachineDefinition;
use crate::rules::Action;
use crate::types::{DefinitionError, State, Symbol};

/// Validates a machine definition.
///
/// The checks run in a fixed order and the first violation is returned:
///
/// 1. the state set is not empty,
/// 2. the alphabet is not empty and each of its entries is a single character,
/// 3. there are as many instructions as transitions,
/// 4. the initial state is declared,
/// 5. instructions and transitions only reference declared states and symbols,
/// 6. the initial configuration starts in the initial state.
///
/// # Returns
///
/// * `Ok(BTreeSet<Symbol>)` with the alphabet as symbols if the definition is valid.
/// * `Err(DefinitionError)` describing the first violation found.
pub fn validate(definition: &MachineDefinition) -> Result<BTreeSet<Symbol>, DefinitionError> {
    [
        check_states,
        check_alphabet,
        check_rule_counts,
        check_initial_state,
        check_instructions,
        check_transitions,
        check_initial_configuration,
    ]
    .iter()
    .try_for_each(|check| check(definition))?;

    Ok(declared_symbols(definition))
}

fn check_states(definition: &MachineDefinition) -> Result<(), DefinitionError> {
    if definition.states.is_empty() {
        return Err(DefinitionError::EmptyStates);
    }

    Ok(())
}

fn check_alphabet(definition: &MachineDefinition) -> Result<(), DefinitionError> {
    if definition.alphabet.is_empty() {
        return Err(DefinitionError::EmptyAlphabet);
    }

    definition
        .alphabet
        .iter()
        .find(|symbol| symbol.chars().count() != 1)
        .map_or(Ok(()), |symbol| {
            Err(DefinitionError::InvalidSymbol(symbol.clone()))
        })
}

fn check_rule_counts(definition: &MachineDefinition) -> Result<(), DefinitionError> {
    let instructions = definition.instructions.len();
    let transitions = definition.transitions.len();

    if instructions != transitions {
        return Err(DefinitionError::RuleCountMismatch {
            instructions,
            transitions,
        });
    }

    Ok(())
}

fn check_initial_state(definition: &MachineDefinition) -> Result<(), DefinitionError> {
    if !definition.states.contains(&definition.initial_state) {
        return Err(DefinitionError::UnknownInitialState(
            definition.initial_state.clone(),
        ));
    }

    Ok(())
}

/// Checks that every instruction's state, symbol and written symbol are declared.
fn check_instructions(definition: &MachineDefinition) -> Result<(), DefinitionError> {
    let symbols = declared_symbols(definition);

    for instruction in &definition.instructions {
        check_state(definition, &instruction.to_string(), instruction.state())?;
        check_symbol(&symbols, &instruction.to_string(), instruction.symbol())?;

        if let Action::Write(symbol) = instruction.action() {
            check_symbol(&symbols, &instruction.to_string(), symbol)?;
        }
    }

    Ok(())
}

/// Checks that every transition's state, symbol and next state are declared.
fn check_transitions(definition: &MachineDefinition) -> Result<(), DefinitionError> {
    let symbols = declared_symbols(definition);

    for transition in &definition.transitions {
        check_state(definition, &transition.to_string(), transition.state())?;
        check_symbol(&symbols, &transition.to_string(), transition.symbol())?;
        check_state(definition, &transition.to_string(), transition.next_state())?;
    }

    Ok(())
}

fn check_initial_configuration(definition: &MachineDefinition) -> Result<(), DefinitionError> {
    let found = definition.initial_configuration.state();

    if found != definition.initial_state {
        return Err(DefinitionError::InitialConfigurationState {
            expected: definition.initial_state.clone(),
            found: found.to_string(),
        });
    }

    Ok(())
}

fn check_state(
    definition: &MachineDefinition,
    rule: &str,
    state: &str,
) -> Result<(), DefinitionError> {
    if !definition.states.contains(state) {
        return Err(DefinitionError::UndeclaredState {
            rule: rule.to_string(),
            state: state.to_string(),
        });
    }

    Ok(())
}

fn check_symbol(
    symbols: &BTreeSet<Symbol>,
    rule: &str,
    symbol: Symbol,
) -> Result<(), DefinitionError> {
    if !symbols.contains(&symbol) {
        return Err(DefinitionError::UndeclaredSymbol {
            rule: rule.to_string(),
            symbol,
        });
    }

    Ok(())
}

/// Returns the single-character entries of the alphabet.
fn declared_symbols(definition: &MachineDefinition) -> BTreeSet<Symbol> {
    definition
        .alphabet
        .iter()
        .filter_map(|symbol| {
            let mut chars = symbol.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        })
        .collect()
}

/// Non-fatal findings about a machine definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    /// Declared `(state, symbol)` pairs with no rule. Reaching one of them at run time
    /// is a stuck configuration.
    pub missing_rules: Vec<(State, Symbol)>,
    /// Declared states that no sequence of transitions reaches from the initial state.
    pub unreachable_states: Vec<State>,
    /// Symbols on the initial tape that are not part of the alphabet.
    pub foreign_tape_symbols: Vec<Symbol>,
}

impl Analysis {
    /// Returns `true` if every declared `(state, symbol)` pair has a rule.
    pub fn is_total(&self) -> bool {
        self.missing_rules.is_empty()
    }

    /// Returns `true` if the analysis found nothing to report.
    pub fn is_clean(&self) -> bool {
        self.missing_rules.is_empty()
            && self.unreachable_states.is_empty()
            && self.foreign_tape_symbols.is_empty()
    }
}

/// Analyzes a machine definition for gaps that validation does not reject.
///
/// All lists in the returned [`Analysis`] are sorted.
pub fn analyze(definition: &MachineDefinition) -> Analysis {
    Analysis {
        missing_rules: find_missing_rules(definition),
        unreachable_states: find_unreachable_states(definition),
        foreign_tape_symbols: find_foreign_tape_symbols(definition),
    }
}

fn find_missing_rules(definition: &MachineDefinition) -> Vec<(State, Symbol)> {
    let defined: HashSet<(&str, Symbol)> = definition
        .instructions
        .iter()
        .map(|instruction| (instruction.state(), instruction.symbol()))
        .collect();
    let symbols = declared_symbols(definition);

    definition
        .states
        .iter()
        .flat_map(|state| symbols.iter().map(move |&symbol| (state, symbol)))
        .filter(|(state, symbol)| !defined.contains(&(state.as_str(), *symbol)))
        .map(|(state, symbol)| (state.clone(), symbol))
        .collect()
}

/// Walks the transitions from the initial state and returns the declared states never visited.
fn find_unreachable_states(definition: &MachineDefinition) -> Vec<State> {
    let mut visited = HashSet::new();
    let mut queue = vec![definition.initial_state.as_str()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        for transition in &definition.transitions {
            if transition.state() == state && !visited.contains(transition.next_state()) {
                queue.push(transition.next_state());
            }
        }
    }

    definition
        .states
        .iter()
        .filter(|state| !visited.contains(state.as_str()))
        .cloned()
        .collect()
}

fn find_foreign_tape_symbols(definition: &MachineDefinition) -> Vec<Symbol> {
    let symbols = declared_symbols(definition);

    definition
        .initial_configuration
        .tape()
        .cells()
        .map(|(_, symbol)| symbol)
        .filter(|symbol| !symbols.contains(symbol))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
