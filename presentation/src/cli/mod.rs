//! Command line definition and keyboard input

pub mod commands;
pub mod input;
