//! Tierwise CLI - Command-line interface
//!
//! This crate provides the `tierwise` binary for routing prompts, inspecting
//! signals and scores, and checking configuration.

pub mod commands;
pub mod render;

pub use commands::{Cli, Commands, ConfigCommands};
