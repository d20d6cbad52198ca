//! This module defines the `Simulator` struct, which drives the subtraction machine through
//! its phases over a single tape and keeps the ordered trace of instantaneous descriptions.
//!
//! A `Simulator` exclusively owns its tape and trace. Build one per input; nothing is
//! shared between runs.

use crate::config::Config;
use crate::phases::{self, describe};
use crate::tape::Tape;
use crate::types::{Description, Operands, Run, State, Step, SEPARATOR};
use tracing::{debug, info};

/// Runs the subtraction machine on one input.
pub struct Simulator {
    input: String,
    state: State,
    tape: Tape,
    descriptions: Vec<Description>,
    operands: Option<Operands>,
    config: Config,
    halted: bool,
}

impl Simulator {
    /// Creates a simulator for `input` with the default configuration.
    ///
    /// The input is normalized (see [`normalize`]), loaded onto a fresh tape, and the
    /// `start` description is recorded.
    pub fn new(input: &str) -> Self {
        Self::with_config(input, Config::default())
    }

    pub fn with_config(input: &str, config: Config) -> Self {
        let input = normalize(input);
        let tape = Tape::new(&input);

        let mut simulator = Self {
            input,
            state: State::Q0,
            tape,
            descriptions: Vec::new(),
            operands: None,
            config,
            halted: false,
        };
        simulator.record_start();
        simulator
    }

    fn record_start(&mut self) {
        let start = describe(self.state, &self.tape, self.config.trace_window, "start");
        self.descriptions.push(start);
    }

    /// Executes the phase for the current state.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if the machine moved on to another phase.
    /// * `Step::Halt` once the accepting state has been recorded, and on every call after.
    pub fn step(&mut self) -> Step {
        if self.halted {
            return Step::Halt;
        }

        let tape = std::mem::take(&mut self.tape);
        let outcome = phases::execute(self.state, tape, &self.config);

        debug!(
            state = %self.state,
            next = %outcome.next,
            recorded = outcome.descriptions.len(),
            head = outcome.tape.head(),
            "phase complete"
        );

        self.tape = outcome.tape;
        self.descriptions.extend(outcome.descriptions);
        if let Some(operands) = outcome.operands {
            self.operands = Some(operands);
        }

        if self.state.is_terminal() {
            self.halted = true;
            return Step::Halt;
        }

        self.state = outcome.next;
        Step::Continue
    }

    /// Runs the machine to completion and returns the trace and the final tape.
    pub fn run(&mut self) -> Run {
        while self.step() == Step::Continue {}

        info!(
            input = %self.input,
            result = %self.result(),
            descriptions = self.descriptions.len(),
            "machine halted"
        );

        Run {
            descriptions: self.descriptions.clone(),
            result: self.result(),
        }
    }

    /// Restores the initial configuration: state `q0`, the loaded tape and a trace holding
    /// only the `start` description.
    pub fn reset(&mut self) {
        self.state = State::Q0;
        self.tape = Tape::new(&self.input);
        self.descriptions.clear();
        self.operands = None;
        self.halted = false;
        self.record_start();
    }

    /// Returns the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns `true` once the accepting state has been recorded.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Every description recorded so far, in order.
    pub fn descriptions(&self) -> &[Description] {
        &self.descriptions
    }

    /// The operands parsed by q2, once it has run.
    pub fn operands(&self) -> Option<&Operands> {
        self.operands.as_ref()
    }

    /// The normalized input the tape was loaded with.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The trimmed tape content. After a run this is the signed difference.
    pub fn result(&self) -> String {
        self.tape.trimmed()
    }
}

/// Normalizes raw input: surrounding whitespace is trimmed, every space becomes a
/// separator, and a separator is appended if there is none (W2 is then zero).
///
/// Other characters are kept; they are ignored when operands are parsed.
pub fn normalize(raw: &str) -> String {
    let mut input = raw.trim().replace(' ', &SEPARATOR.to_string());
    if !input.contains(SEPARATOR) {
        input.push(SEPARATOR);
    }
    input
}

/// Runs a fresh simulator on `input` with the default configuration.
pub fn simulate(input: &str) -> Run {
    Simulator::new(input).run()
}
