//! Execution helpers shared by the interpreter.
//!
//! - `control`: control signals, loop bookkeeping, condition checks
//! - `call`: resolved places and argument bindings for the call protocol

pub mod call;
pub mod control;
