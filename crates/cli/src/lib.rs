//! Scripted conversation driver
//!
//! Plays the host's role for the restaurant form: reads pre-parsed user
//! turns from a script file, runs the form once per turn and renders what it
//! dispatched.

pub mod replay;
pub mod script;

pub use replay::{Replay, TurnOutcome};
pub use script::{Script, ScriptError};
