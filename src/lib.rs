//! This crate provides a deterministic single-tape Turing machine engine.
//! It includes modules for the tape and configuration model, the paired instruction/transition
//! program, the execution engine with full traces, definition validation and analysis, and a
//! small text notation with a set of built-in machines.

pub mod analyzer;
pub mod configuration;
pub mod definition;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod program;
pub mod programs;
pub mod rules;
pub mod tape;
pub mod trace;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the validation and analysis entry points.
pub use analyzer::{analyze, validate, Analysis};
pub use configuration::Configuration;
pub use definition::MachineDefinition;
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` engine from the machine module.
pub use machine::TuringMachine;
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
pub use program::Program;
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
pub use rules::{Action, Instruction, Quadruple, Transition};
pub use tape::{Tape, TapePolicy};
pub use trace::{StepRecord, Trace};
/// Re-exports the shared aliases, constants and error types from the types module.
pub use types::{DefinitionError, State, Symbol, TuringMachineError, DEFAULT_BLANK_SYMBOL};
