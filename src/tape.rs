//! This module defines the `Tape`, a bidirectional, integer-addressed sequence of symbols.
//!
//! Only cells that were initialized or written are stored, keyed by position, so a cursor far
//! away from the initial run costs nothing. How accesses outside of the initial run behave is
//! decided by the tape's `TapePolicy`.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use crate::types::{Symbol, TuringMachineError, DEFAULT_BLANK_SYMBOL};

/// Gaps between stored cells up to this length are shown as blanks when laying out a tape.
/// Longer gaps collapse into a single marker.
pub const MAX_FILLED_GAP: u64 = 8;

/// Controls how a tape treats positions outside of its initial extent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TapePolicy {
    /// Unwritten positions read as the blank symbol; writes store a new cell.
    #[default]
    Unbounded,
    /// Positions outside the initial extent are errors.
    Bounded,
}

/// A bidirectional tape of symbols addressed by `i64` positions.
///
/// Every position below `i64::MAX` is addressable, so `position + 1` of a stored cell always
/// fits in an `i64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tape {
    cells: BTreeMap<i64, Symbol>,
    blank: Symbol,
    policy: TapePolicy,
    initial: Range<i64>,
}

impl Tape {
    /// Creates an unbounded tape holding `symbols`, the first of which sits at `offset`.
    ///
    /// # Arguments
    ///
    /// * `symbols` - The initial run of symbols.
    /// * `offset` - The position of the first symbol; may be negative.
    ///
    /// # Returns
    ///
    /// * `Ok(Tape)` holding the run.
    /// * `Err(TuringMachineError::PositionOverflow)` if the run does not fit below `i64::MAX`.
    pub fn new(
        symbols: impl IntoIterator<Item = Symbol>,
        offset: i64,
    ) -> Result<Self, TuringMachineError> {
        let mut cells = BTreeMap::new();
        let mut end = offset;

        for symbol in symbols {
            cells.insert(end, symbol);
            end = end
                .checked_add(1)
                .ok_or(TuringMachineError::PositionOverflow(end))?;
        }

        Ok(Self {
            cells,
            blank: DEFAULT_BLANK_SYMBOL,
            policy: TapePolicy::default(),
            initial: offset..end,
        })
    }

    /// Sets the symbol read from positions that were never written.
    pub fn with_blank(mut self, blank: Symbol) -> Self {
        self.blank = blank;
        self
    }

    /// Sets the bounds policy of the tape.
    pub fn with_policy(mut self, policy: TapePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the symbol stored at `position`.
    ///
    /// # Returns
    ///
    /// * `Ok(Symbol)` with the stored symbol, or the blank symbol for an unwritten position
    ///   of an unbounded tape.
    /// * `Err(TuringMachineError::TapeBoundary)` if the tape is bounded and `position` lies
    ///   outside of its initial extent.
    pub fn get(&self, position: i64) -> Result<Symbol, TuringMachineError> {
        self.check_bounds(position)?;

        Ok(self.cells.get(&position).copied().unwrap_or(self.blank))
    }

    /// Overwrites the symbol at `position`, under the same bounds policy as [`Tape::get`].
    ///
    /// Writing `i64::MAX` fails with `TuringMachineError::PositionOverflow`.
    pub fn set(&mut self, position: i64, symbol: Symbol) -> Result<(), TuringMachineError> {
        self.check_bounds(position)?;

        if position == i64::MAX {
            return Err(TuringMachineError::PositionOverflow(position));
        }

        self.cells.insert(position, symbol);
        Ok(())
    }

    /// Returns the blank symbol of this tape.
    pub fn blank(&self) -> Symbol {
        self.blank
    }

    /// Returns the bounds policy of this tape.
    pub fn policy(&self) -> TapePolicy {
        self.policy
    }

    /// Returns the range of positions from the leftmost to the rightmost stored cell.
    ///
    /// A tape with no stored cells reports its initial extent.
    pub fn extent(&self) -> Range<i64> {
        match (self.cells.first_key_value(), self.cells.last_key_value()) {
            (Some((&start, _)), Some((&end, _))) => start..end + 1,
            _ => self.initial.clone(),
        }
    }

    /// Returns the range of positions the tape was created with.
    pub fn initial_extent(&self) -> Range<i64> {
        self.initial.clone()
    }

    /// Returns the stored cells in position order.
    pub fn cells(&self) -> impl Iterator<Item = (i64, Symbol)> + '_ {
        self.cells.iter().map(|(&position, &symbol)| (position, symbol))
    }

    /// Returns every symbol of the extent as a `String`, with blanks between stored cells.
    ///
    /// This materializes the whole extent; use [`Tape::cells`] or [`Tape::layout`] for tapes
    /// that were written far apart.
    pub fn content(&self) -> String {
        self.extent()
            .map(|position| self.cells.get(&position).copied().unwrap_or(self.blank))
            .collect()
    }

    /// Lays out the stored cells, plus `include` if given, in position order.
    ///
    /// Gaps of up to [`MAX_FILLED_GAP`] positions are filled with blanks. Each longer gap is
    /// a single `None`.
    pub fn layout(&self, include: Option<i64>) -> Vec<Option<(i64, Symbol)>> {
        let mut positions: Vec<i64> = self.cells.keys().copied().collect();
        if let Some(position) = include {
            if let Err(index) = positions.binary_search(&position) {
                positions.insert(index, position);
            }
        }

        let mut layout = Vec::with_capacity(positions.len());
        let mut previous: Option<i64> = None;

        for position in positions {
            if let Some(previous) = previous {
                let gap = position.abs_diff(previous) - 1;
                if gap > MAX_FILLED_GAP {
                    layout.push(None);
                } else {
                    layout.extend((1..=gap as i64).map(|step| Some((previous + step, self.blank))));
                }
            }

            let symbol = self.cells.get(&position).copied().unwrap_or(self.blank);
            layout.push(Some((position, symbol)));
            previous = Some(position);
        }

        layout
    }

    fn check_bounds(&self, position: i64) -> Result<(), TuringMachineError> {
        match self.policy {
            TapePolicy::Bounded if !self.initial.contains(&position) => {
                Err(TuringMachineError::TapeBoundary(position))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = self
            .layout(None)
            .into_iter()
            .map(|cell| cell.map_or("..".to_string(), |(_, symbol)| symbol.to_string()))
            .collect::<Vec<_>>()
            .join(" ");

        write!(f, "Tape({symbols})")
    }
}
