//! This module defines the shared aliases, constants and error types used throughout the
//! engine: what a symbol and a state are, and everything that can go wrong while defining
//! or running a machine.

use thiserror::Error;

use crate::Rule;

/// A single tape symbol drawn from the machine's alphabet.
pub type Symbol = char;
/// An opaque state label drawn from the machine's declared state set.
pub type State = String;

/// The default blank symbol occupying tape cells that were never written.
pub const DEFAULT_BLANK_SYMBOL: Symbol = '_';
/// The maximum allowed size for a machine notation source in bytes.
pub const MAX_PROGRAM_SIZE: usize = 65536; // 64KB

/// Errors raised while validating a machine definition.
///
/// Any of these is fatal to construction: no engine is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// The declared state set is empty.
    #[error("State set is empty")]
    EmptyStates,
    /// The declared alphabet is empty.
    #[error("Alphabet is empty")]
    EmptyAlphabet,
    /// An alphabet entry is not exactly one character long.
    #[error("Alphabet symbol {0:?} must be exactly one character")]
    InvalidSymbol(String),
    /// The number of instructions differs from the number of transitions.
    #[error("Instruction count ({instructions}) does not match transition count ({transitions})")]
    RuleCountMismatch {
        instructions: usize,
        transitions: usize,
    },
    /// The declared initial state is not part of the state set.
    #[error("Initial state {0} is not a declared state")]
    UnknownInitialState(State),
    /// A rule references a state outside the declared state set.
    #[error("{rule} references undeclared state {state}")]
    UndeclaredState { rule: String, state: State },
    /// A rule references a symbol outside the declared alphabet.
    #[error("{rule} references undeclared symbol {symbol:?}")]
    UndeclaredSymbol { rule: String, symbol: Symbol },
    /// Two rules of the same kind share a `(state, symbol)` key.
    #[error("Duplicate {kind} for state {state} and symbol {symbol:?}")]
    DuplicateRule {
        kind: &'static str,
        state: State,
        symbol: Symbol,
    },
    /// A rule has no counterpart of the other kind with the same key.
    #[error("{kind} for state {state} and symbol {symbol:?} has no matching {missing}")]
    UnpairedRule {
        kind: &'static str,
        missing: &'static str,
        state: State,
        symbol: Symbol,
    },
    /// The supplied initial configuration does not start in the declared initial state.
    #[error("Initial configuration is in state {found}, expected {expected}")]
    InitialConfigurationState { expected: State, found: State },
}

/// Represents various errors that can occur during Turing Machine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// The machine definition is malformed.
    #[error("Invalid machine definition: {0}")]
    Definition(#[from] DefinitionError),
    /// No instruction/transition pair matches the live `(state, symbol)`.
    #[error("Stuck configuration: no rule defined for state {state} and symbol {symbol:?}")]
    StuckConfiguration { state: State, symbol: Symbol },
    /// A rule was applied to a configuration whose `(state, symbol)` differs from its key.
    #[error("{rule} cannot be applied in state {state} reading {symbol:?}")]
    PreconditionViolation {
        rule: String,
        state: State,
        symbol: Symbol,
    },
    /// A bounded tape was accessed outside of its initial extent.
    #[error("Tape position {0} is outside the tape bounds")]
    TapeBoundary(i64),
    /// A tape or cursor position would leave the addressable `i64` range.
    #[error("Tape position overflow next to position {0}")]
    PositionOverflow(i64),
    /// Indicates an error during the parsing of a machine notation source.
    #[error("Program parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates that a machine notation source is structurally incomplete or too large.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to reading program files.
    #[error("File error: {0}")]
    FileError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = TuringMachineError::StuckConfiguration {
            state: "q3".to_string(),
            symbol: '|',
        };

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Stuck configuration"));
        assert!(error_msg.contains("q3"));
        assert!(error_msg.contains("'|'"));
    }

    #[test]
    fn test_definition_error_converts() {
        let error: TuringMachineError = DefinitionError::EmptyStates.into();

        assert_eq!(error, TuringMachineError::Definition(DefinitionError::EmptyStates));
        assert_eq!(
            error.to_string(),
            "Invalid machine definition: State set is empty"
        );
    }

    #[test]
    fn test_unpaired_rule_display() {
        let error = DefinitionError::UnpairedRule {
            kind: "instruction",
            missing: "transition",
            state: "q0".to_string(),
            symbol: '*',
        };

        assert_eq!(
            error.to_string(),
            "instruction for state q0 and symbol '*' has no matching transition"
        );
    }
}
