//! Command-line interface for pkgprobe.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations
//! - [`settings`] - Config loading with command-line overrides

pub mod args;
pub mod commands;
pub mod settings;

pub use args::{
    Cli, Commands, CompletionsArgs, ConfigArgs, ConfigureArgs, InstallArgs, ListArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
pub use settings::{Overrides, Settings};
