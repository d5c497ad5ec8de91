//! The instantaneous status of a machine: its state, its tape and the cursor position.

use serde::Serialize;
use std::fmt;

use crate::tape::Tape;
use crate::types::{State, Symbol, TuringMachineError};

/// A snapshot of `(state, tape, cursor)` at one instant.
///
/// A configuration exclusively owns its tape, so `clone()` is a deep copy: mutating the
/// clone never alters the original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    state: State,
    tape: Tape,
    cursor: i64,
}

impl Configuration {
    pub fn new(state: impl Into<State>, tape: Tape, cursor: i64) -> Self {
        Self {
            state: state.into(),
            tape,
            cursor,
        }
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Returns the symbol under the cursor.
    pub fn symbol(&self) -> Result<Symbol, TuringMachineError> {
        self.tape.get(self.cursor)
    }

    pub(crate) fn set_state(&mut self, state: impl Into<State>) {
        self.state = state.into();
    }

    pub(crate) fn set_cursor(&mut self, cursor: i64) {
        self.cursor = cursor;
    }

    pub(crate) fn tape_mut(&mut self) -> &mut Tape {
        &mut self.tape
    }

    /// Splits the configuration into its `(state, tape, cursor)` parts.
    pub(crate) fn into_parts(self) -> (State, Tape, i64) {
        (self.state, self.tape, self.cursor)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration({}, {}, {})", self.state, self.tape, self.cursor)
    }
}
