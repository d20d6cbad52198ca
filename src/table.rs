//! The descriptive transition table and formal definition of the subtraction machine.
//!
//! Both are built once and never change. They document what each phase does for display
//! purposes; the phase engine in [`crate::phases`] is hard-wired and does not read them.

use crate::types::{Direction, State, TransitionRule, BLANK_SYMBOL, NEGATIVE_SIGN, SEPARATOR};
use serde::Serialize;

/// The formal 7-tuple `(Q, Σ, Γ, δ, q0, B, F)` of the machine, with δ kept in [`TRANSITIONS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub states: Vec<State>,
    pub input_alphabet: Vec<char>,
    pub tape_alphabet: Vec<char>,
    pub initial_state: State,
    pub blank: char,
    pub accepting_states: Vec<State>,
}

lazy_static::lazy_static! {
    pub static ref DEFINITION: Definition = Definition {
        states: State::ALL.to_vec(),
        input_alphabet: vec!['0', '1', SEPARATOR],
        tape_alphabet: vec!['0', '1', SEPARATOR, BLANK_SYMBOL, NEGATIVE_SIGN],
        initial_state: State::Q0,
        blank: BLANK_SYMBOL,
        accepting_states: vec![State::Qf],
    };

    /// All rules, sorted by state and then by read symbol.
    pub static ref TRANSITIONS: Vec<TransitionRule> = {
        use Direction::{Left, Right, Stay};
        use State::*;

        let mut rules = vec![
            // q0: scan right to the separator
            rule(Q0, '0', '0', Right, Q0),
            rule(Q0, '1', '1', Right, Q0),
            rule(Q0, SEPARATOR, SEPARATOR, Right, Q1),
            rule(Q0, BLANK_SYMBOL, BLANK_SYMBOL, Right, Q0),
            // q1: run past the second operand, then step back onto its last digit
            rule(Q1, '0', '0', Right, Q1),
            rule(Q1, '1', '1', Right, Q1),
            rule(Q1, BLANK_SYMBOL, BLANK_SYMBOL, Left, Q2),
            // q2: compute and write the difference
            rule(Q2, '0', '0', Stay, Q2),
            rule(Q2, '1', '1', Stay, Q2),
            rule(Q2, SEPARATOR, SEPARATOR, Left, Q3),
            rule(Q2, BLANK_SYMBOL, BLANK_SYMBOL, Left, Q3),
            // q3: strip leading zeros from the result
            rule(Q3, '0', '0', Right, Q3),
            rule(Q3, '1', '1', Right, Q3),
            rule(Q3, SEPARATOR, SEPARATOR, Right, Q4),
            rule(Q3, BLANK_SYMBOL, BLANK_SYMBOL, Right, Q4),
            // q4: accept
            rule(Q4, BLANK_SYMBOL, BLANK_SYMBOL, Stay, Qf),
            rule(Q4, '0', '0', Stay, Qf),
            rule(Q4, '1', '1', Stay, Qf),
        ];

        rules.sort_by_key(|r| (r.state, r.read));
        rules
    };
}

fn rule(
    state: State,
    read: char,
    write: char,
    direction: Direction,
    next_state: State,
) -> TransitionRule {
    TransitionRule {
        state,
        read,
        write,
        direction,
        next_state,
    }
}

/// Returns every rule whose source state is `state`.
pub fn rules_for(state: State) -> Vec<TransitionRule> {
    TRANSITIONS
        .iter()
        .filter(|r| r.state == state)
        .copied()
        .collect()
}

/// Looks up the rule for `(state, symbol)`, if the table lists one.
pub fn lookup(state: State, symbol: char) -> Option<TransitionRule> {
    TRANSITIONS
        .iter()
        .find(|r| r.state == state && r.read == symbol)
        .copied()
}
