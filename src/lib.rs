//! This crate provides a single-tape Turing machine that subtracts two binary operands,
//! `W1 # W2`, and records every instantaneous description along the way.
//! It includes the tape, the phase engine, the arithmetic used to check what the machine
//! writes, and the descriptive transition table shown next to a trace.

pub mod arithmetic;
pub mod config;
pub mod loader;
pub mod machine;
pub mod phases;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the signed binary subtraction from the arithmetic module.
pub use arithmetic::subtract_signed;
/// Re-exports the `Config` struct from the config module.
pub use config::Config;
/// Re-exports the `InputLoader` struct from the loader module.
pub use loader::InputLoader;
/// Re-exports the simulator and its helpers from the machine module.
pub use machine::{normalize, simulate, Simulator};
/// Re-exports the phase transform and its outcome from the phases module.
pub use phases::{execute, PhaseOutcome};
/// Re-exports the static table and machine definition from the table module.
pub use table::{Definition, DEFINITION, TRANSITIONS};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the shared types from the types module.
pub use types::{
    Description, Direction, Operands, Run, SimulatorError, State, Step, TransitionRule,
};
