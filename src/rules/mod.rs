//! Turn processing.
//!
//! `TurnProcessor::process_turn` is the engine's single entry point: it
//! takes the current state, an intent and the scene context, and returns
//! either the next state or an error with the caller's state untouched.

pub mod processor;

pub use processor::{Clock, TurnOutput, TurnProcessor};
