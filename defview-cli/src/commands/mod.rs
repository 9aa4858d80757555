//! Command implementations for DefView CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod bounds;
pub mod show;
