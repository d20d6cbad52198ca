//! The five execution phases of the subtraction machine.
//!
//! Each phase is a transform from `(state, tape)` to a [`PhaseOutcome`] holding the mutated
//! tape, the next state and the descriptions recorded along the way. Phases expect a tape
//! that went through the earlier phases in order; [`crate::Simulator`] drives them.

use crate::arithmetic::subtract_signed;
use crate::config::Config;
use crate::tape::Tape;
use crate::types::{
    is_binary_digit, Description, Operands, State, BLANK_SYMBOL, NEGATIVE_SIGN, SEPARATOR,
};
use tracing::warn;

/// What a single phase produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseOutcome {
    pub tape: Tape,
    pub next: State,
    pub descriptions: Vec<Description>,
    /// Set by q2, which parses the operands off the tape.
    pub operands: Option<Operands>,
}

/// Runs the phase for `state` on `tape`.
///
/// `Qf` records the final description and maps to itself.
pub fn execute(state: State, mut tape: Tape, config: &Config) -> PhaseOutcome {
    let mut recorder = Recorder::new(config.trace_window);
    let mut operands = None;

    let next = match state {
        State::Q0 => scan_to_separator(&mut tape, &mut recorder),
        State::Q1 => skip_subtrahend(&mut tape, &mut recorder),
        State::Q2 => {
            let (next, parsed) = compute_difference(&mut tape, &mut recorder, config.erase_window);
            operands = Some(parsed);
            next
        }
        State::Q3 => normalize_result(&mut tape, &mut recorder, config.erase_window),
        State::Q4 => prepare_halt(&mut tape, &mut recorder),
        State::Qf => accept(&tape, &mut recorder),
    };

    PhaseOutcome {
        tape,
        next,
        descriptions: recorder.into_descriptions(),
        operands,
    }
}

/// Builds one description of `tape` in `state`, showing `width` cells around the head.
pub fn describe(state: State, tape: &Tape, width: usize, note: impl Into<String>) -> Description {
    let (visible, offset) = tape.window(width);
    let visual: String = visible
        .chars()
        .enumerate()
        .map(|(i, symbol)| {
            if i == offset {
                format!("[{}]", symbol)
            } else {
                format!(" {} ", symbol)
            }
        })
        .collect();

    Description {
        state,
        visual,
        tape: tape.trimmed(),
        note: note.into(),
        head: tape.head(),
        cells: tape.len(),
    }
}

/// Appends descriptions for a single phase. Recording never touches the tape.
struct Recorder {
    width: usize,
    descriptions: Vec<Description>,
}

impl Recorder {
    fn new(width: usize) -> Self {
        Self {
            width,
            descriptions: Vec::new(),
        }
    }

    fn record(&mut self, state: State, tape: &Tape, note: impl Into<String>) {
        self.descriptions.push(describe(state, tape, self.width, note));
    }

    fn into_descriptions(self) -> Vec<Description> {
        self.descriptions
    }
}

/// q0: move right until the separator, then step past it.
fn scan_to_separator(tape: &mut Tape, recorder: &mut Recorder) -> State {
    loop {
        let symbol = tape.read();
        recorder.record(State::Q0, tape, format!("q0: reading {}", symbol));

        // A tape that never had a separator gets one at its last cell, making W2 zero.
        let at_end = symbol == BLANK_SYMBOL && tape.head() + 1 == tape.len();
        if symbol == SEPARATOR || at_end {
            tape.write(SEPARATOR);
            tape.move_right();
            recorder.record(State::Q1, tape, "q0: found separator, entering q1");
            return State::Q1;
        }

        tape.move_right();
    }
}

/// q1: move right over the digits of W2, then back onto its last digit.
fn skip_subtrahend(tape: &mut Tape, recorder: &mut Recorder) -> State {
    loop {
        let symbol = tape.read();
        recorder.record(State::Q1, tape, format!("q1: reading {}", symbol));

        if !is_binary_digit(symbol) {
            tape.move_left();
            recorder.record(State::Q2, tape, "q1: passed W2, entering q2");
            return State::Q2;
        }

        tape.move_right();
    }
}

/// q2: parse both operands, compute the difference and write it after the separator.
fn compute_difference(
    tape: &mut Tape,
    recorder: &mut Recorder,
    erase_window: usize,
) -> (State, Operands) {
    let operands = parse_operands(tape);
    let parsed = format!("q2: parsed W1={} W2={}", operands.minuend, operands.subtrahend);
    recorder.record(State::Q2, tape, parsed);

    if operands.subtrahend.len() > erase_window {
        warn!(
            width = operands.subtrahend.len(),
            erase_window,
            "second operand is wider than the erase window"
        );
    }

    let result = subtract_signed(&operands.minuend, &operands.subtrahend);
    recorder.record(State::Q2, tape, format!("q2: difference is {}", result));

    while tape.read() != SEPARATOR && tape.head() > 0 {
        tape.move_left();
        recorder.record(State::Q2, tape, "q2: seeking separator");
    }

    tape.write(SEPARATOR);
    tape.move_right();
    recorder.record(State::Q2, tape, "q2: found separator, overwriting result zone");

    erase_zone(tape, erase_window);
    recorder.record(State::Q2, tape, "q2: result zone cleared");

    write_symbols(tape, recorder, State::Q2, &result);

    (State::Q3, operands)
}

/// q3: read back the written result, strip its leading zeros and rewrite it.
fn normalize_result(tape: &mut Tape, recorder: &mut Recorder, erase_window: usize) -> State {
    while tape.read() != SEPARATOR && tape.head() > 0 {
        tape.move_left();
        recorder.record(State::Q3, tape, "q3: seeking separator");
    }

    tape.move_right();
    recorder.record(State::Q3, tape, "q3: at start of result");

    let start = tape.head();
    let mut written = String::new();
    while matches!(tape.read(), '0' | '1' | NEGATIVE_SIGN) {
        written.push(tape.read());
        tape.move_right();
    }
    while tape.head() > start {
        tape.move_left();
    }

    let normalized = normalize_signed(&written);
    recorder.record(State::Q3, tape, format!("q3: normalized result is {}", normalized));

    erase_zone(tape, erase_window);
    write_symbols(tape, recorder, State::Q3, &normalized);

    State::Q4
}

/// q4: clear the separator and W1 so only the result remains, then hand over to qf.
fn prepare_halt(tape: &mut Tape, recorder: &mut Recorder) -> State {
    clear_operands(tape);
    recorder.record(State::Q4, tape, "q4: operands cleared, preparing to accept");

    State::Qf
}

fn accept(tape: &Tape, recorder: &mut Recorder) -> State {
    recorder.record(State::Qf, tape, "qf: accepted (halt)");

    State::Qf
}

/// Splits the non-blank core of the tape on its first separator and keeps only the
/// binary digits of each side.
fn parse_operands(tape: &Tape) -> Operands {
    let core = tape.core();
    let (left, right) = core.split_once(SEPARATOR).unwrap_or((core.as_str(), ""));

    Operands {
        minuend: left.chars().filter(|&c| is_binary_digit(c)).collect(),
        subtrahend: right.chars().filter(|&c| is_binary_digit(c)).collect(),
    }
}

/// Keeps a leading sign, drops leading zeros of the magnitude. Zero never carries a sign.
fn normalize_signed(written: &str) -> String {
    let (sign, magnitude) = match written.strip_prefix(NEGATIVE_SIGN) {
        Some(magnitude) => (Some(NEGATIVE_SIGN), magnitude),
        None => (None, written),
    };

    match (sign, magnitude.trim_start_matches('0')) {
        (_, "") => "0".to_string(),
        (Some(sign), digits) => format!("{}{}", sign, digits),
        (None, digits) => digits.to_string(),
    }
}

/// Blanks `width` cells starting at the head and returns to the cell after the separator.
/// The head must be right of the separator.
fn erase_zone(tape: &mut Tape, width: usize) {
    for _ in 0..width {
        tape.write(BLANK_SYMBOL);
        tape.move_right();
    }

    while tape.read() != SEPARATOR && tape.head() > 0 {
        tape.move_left();
    }
    tape.move_right();
}

/// Writes `symbols` left to right, one description per symbol.
fn write_symbols(tape: &mut Tape, recorder: &mut Recorder, state: State, symbols: &str) {
    for symbol in symbols.chars() {
        tape.write(symbol);
        tape.move_right();
        recorder.record(state, tape, format!("{}: wrote {}", state, symbol));
    }
}

/// Blanks the separator and every cell left of it, leaving the head on the first
/// result symbol.
fn clear_operands(tape: &mut Tape) {
    while tape.read() != SEPARATOR && tape.head() > 0 {
        tape.move_left();
    }

    let separator = tape.head();
    loop {
        tape.write(BLANK_SYMBOL);
        if tape.head() == 0 {
            break;
        }
        tape.move_left();
    }

    while tape.head() <= separator {
        tape.move_right();
    }
}
