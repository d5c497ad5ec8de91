//! This module defines the two halves of a program rule and the paired entry they come from.
//!
//! For a given `(state, symbol)` key, an `Instruction` decides what happens to the tape and the
//! cursor, and a `Transition` decides the next state. A `Quadruple` carries both halves at once.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::configuration::Configuration;
use crate::types::{State, Symbol, TuringMachineError};

/// What an instruction does to the tape or the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move the cursor one position to the left.
    Left,
    /// Move the cursor one position to the right.
    Right,
    /// Stop execution. Leaves the tape and the cursor unchanged.
    Halt,
    /// Overwrite the cell under the cursor.
    Write(Symbol),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Left => write!(f, "LEFT"),
            Action::Right => write!(f, "RIGHT"),
            Action::Halt => write!(f, "HALT"),
            Action::Write(symbol) => write!(f, "{symbol}"),
        }
    }
}

/// The tape/cursor half of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Instruction {
    state: State,
    symbol: Symbol,
    action: Action,
}

impl Instruction {
    pub fn new(state: impl Into<State>, symbol: Symbol, action: Action) -> Self {
        Self {
            state: state.into(),
            symbol,
            action,
        }
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// Applies the action to `configuration`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` once the tape or the cursor has been updated.
    /// * `Err(TuringMachineError::PreconditionViolation)` if the configuration is not in this
    ///   instruction's state or is not reading this instruction's symbol. Nothing is changed.
    pub fn apply(&self, configuration: &mut Configuration) -> Result<(), TuringMachineError> {
        check_key(&self.to_string(), &self.state, self.symbol, configuration)?;

        let cursor = configuration.cursor();
        match self.action {
            Action::Left => configuration.set_cursor(
                cursor
                    .checked_sub(1)
                    .ok_or(TuringMachineError::PositionOverflow(cursor))?,
            ),
            Action::Right => configuration.set_cursor(
                cursor
                    .checked_add(1)
                    .ok_or(TuringMachineError::PositionOverflow(cursor))?,
            ),
            Action::Halt => {}
            Action::Write(symbol) => configuration.tape_mut().set(cursor, symbol)?,
        }

        Ok(())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instruction({}, {}, {})", self.state, self.symbol, self.action)
    }
}

/// The state-change half of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Transition {
    state: State,
    symbol: Symbol,
    next_state: State,
}

impl Transition {
    pub fn new(state: impl Into<State>, symbol: Symbol, next_state: impl Into<State>) -> Self {
        Self {
            state: state.into(),
            symbol,
            next_state: next_state.into(),
        }
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn next_state(&self) -> &str {
        &self.next_state
    }

    /// Moves `configuration` into the next state, under the same precondition as
    /// [`Instruction::apply`].
    pub fn apply(&self, configuration: &mut Configuration) -> Result<(), TuringMachineError> {
        check_key(&self.to_string(), &self.state, self.symbol, configuration)?;

        configuration.set_state(self.next_state.as_str());
        Ok(())
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transition({}, {}, {})",
            self.state, self.symbol, self.next_state
        )
    }
}

/// A paired rule `(state, symbol) -> (action, next_state)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quadruple {
    pub state: State,
    pub symbol: Symbol,
    pub action: Action,
    pub next_state: State,
}

impl Quadruple {
    pub fn new(
        state: impl Into<State>,
        symbol: Symbol,
        action: Action,
        next_state: impl Into<State>,
    ) -> Self {
        Self {
            state: state.into(),
            symbol,
            action,
            next_state: next_state.into(),
        }
    }

    pub fn instruction(&self) -> Instruction {
        Instruction::new(self.state.as_str(), self.symbol, self.action)
    }

    pub fn transition(&self) -> Transition {
        Transition::new(self.state.as_str(), self.symbol, self.next_state.as_str())
    }

    /// Decomposes the entry into its instruction and transition halves.
    pub fn split(self) -> (Instruction, Transition) {
        let instruction = Instruction::new(self.state.as_str(), self.symbol, self.action);
        let transition = Transition::new(self.state, self.symbol, self.next_state);
        (instruction, transition)
    }
}

fn check_key(
    rule: &str,
    state: &str,
    symbol: Symbol,
    configuration: &Configuration,
) -> Result<(), TuringMachineError> {
    let current = configuration.symbol()?;

    if configuration.state() != state || current != symbol {
        return Err(TuringMachineError::PreconditionViolation {
            rule: rule.to_string(),
            state: configuration.state().to_string(),
            symbol: current,
        });
    }

    Ok(())
}
