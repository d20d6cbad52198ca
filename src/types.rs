//! This module defines the core data structures and types shared by the subtraction machine:
//! tape symbols, machine states, head directions, recorded descriptions and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The blank symbol used on the tape.
pub const BLANK_SYMBOL: char = '_';
/// The symbol separating the two operands.
pub const SEPARATOR: char = '#';
/// The sign symbol prefixed to negative results.
pub const NEGATIVE_SIGN: char = '-';
/// Blank cells placed in front of the input when a tape is loaded.
pub const LEFT_MARGIN: usize = 10;
/// Blank cells placed after the input when a tape is loaded.
pub const RIGHT_MARGIN: usize = 30;
/// Input used when the caller supplies nothing.
pub const DEFAULT_INPUT: &str = "101 # 011";

/// Returns `true` if `symbol` is a binary digit.
pub fn is_binary_digit(symbol: char) -> bool {
    symbol == '0' || symbol == '1'
}

/// The states of the subtraction machine. Each non-terminal state is one execution phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum State {
    /// Scan right to the separator.
    #[serde(rename = "q0")]
    Q0,
    /// Move past the second operand.
    #[serde(rename = "q1")]
    Q1,
    /// Compute the difference and write it after the separator.
    #[serde(rename = "q2")]
    Q2,
    /// Normalize the written result.
    #[serde(rename = "q3")]
    Q3,
    /// Prepare the halt.
    #[serde(rename = "q4")]
    Q4,
    /// Accepting state.
    #[serde(rename = "qf")]
    Qf,
}

impl State {
    /// All states in execution order.
    pub const ALL: [State; 6] = [
        State::Q0,
        State::Q1,
        State::Q2,
        State::Q3,
        State::Q4,
        State::Qf,
    ];

    /// Returns `true` for the accepting state.
    pub fn is_terminal(self) -> bool {
        self == State::Qf
    }

    /// The state that follows this one in the fixed phase order. `Qf` maps to itself.
    pub fn next(self) -> State {
        match self {
            State::Q0 => State::Q1,
            State::Q1 => State::Q2,
            State::Q2 => State::Q3,
            State::Q3 => State::Q4,
            State::Q4 | State::Qf => State::Qf,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            State::Q0 => "q0",
            State::Q1 => "q1",
            State::Q2 => "q2",
            State::Q3 => "q3",
            State::Q4 => "q4",
            State::Qf => "qf",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    pub fn as_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Stay => 'S',
        }
    }
}

/// A descriptive `(state, read) -> (write, move, next)` rule.
///
/// Rules are documentation of what each phase does; the phase engine does not consult them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRule {
    pub state: State,
    pub read: char,
    pub write: char,
    pub direction: Direction,
    pub next_state: State,
}

impl fmt::Display for TransitionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "δ({}, {}) = ({}, {}, {})",
            self.state,
            self.read,
            self.write,
            self.direction.as_char(),
            self.next_state
        )
    }
}

/// The two operands parsed from the tape during phase q2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operands {
    pub minuend: String,
    pub subtrahend: String,
}

/// An instantaneous description: one immutable snapshot of the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    /// The state the machine is in at this snapshot.
    pub state: State,
    /// Windowed rendering of the tape with the head cell bracketed.
    pub visual: String,
    /// The full tape with surrounding blanks removed.
    pub tape: String,
    /// What the machine just did.
    pub note: String,
    /// Absolute head index.
    pub head: usize,
    /// Tape length at the time of the snapshot.
    pub cells: usize,
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} |{}| {}", self.state, self.visual, self.note)
    }
}

/// The output of a complete run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Every recorded description, in order. Never empty; the last one is in `qf`.
    pub descriptions: Vec<Description>,
    /// The trimmed content of the final tape.
    pub result: String,
}

/// Represents the outcome of a single phase step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A phase ran and the machine has more to do.
    Continue,
    /// The machine has reached and recorded the accepting state.
    Halt,
}

/// Errors raised by the surfaces around the engine. Running the machine itself never fails.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// Indicates an error reading an input or configuration file.
    #[error("File error: {0}")]
    FileError(String),
    /// Indicates malformed configuration content.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] serde_json::Error),
    /// Indicates configuration values the machine cannot run with.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left_json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(left_json, "\"Left\"");

        let left: Direction = serde_json::from_str(&left_json).unwrap();
        assert_eq!(left, Direction::Left);
    }

    #[test]
    fn test_state_order() {
        let mut state = State::Q0;
        let mut visited = vec![state];
        while !state.is_terminal() {
            state = state.next();
            visited.push(state);
        }

        assert_eq!(visited, State::ALL.to_vec());
        assert_eq!(State::Qf.next(), State::Qf);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(State::Q0.to_string(), "q0");
        assert_eq!(State::Qf.to_string(), "qf");
        assert_eq!(serde_json::to_string(&State::Q3).unwrap(), "\"q3\"");
    }

    #[test]
    fn test_rule_display() {
        let rule = TransitionRule {
            state: State::Q0,
            read: SEPARATOR,
            write: SEPARATOR,
            direction: Direction::Right,
            next_state: State::Q1,
        };

        assert_eq!(rule.to_string(), "δ(q0, #) = (#, R, q1)");
    }

    #[test]
    fn test_error_display() {
        let error = SimulatorError::ValidationError("erase window must be positive".to_string());

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Validation error"));
        assert!(error_msg.contains("erase window"));
    }
}
