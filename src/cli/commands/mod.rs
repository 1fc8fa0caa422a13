//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations with shared [`Settings`]
//! (project root, config path and flag overrides).
//!
//! [`Settings`]: crate::cli::settings::Settings

pub mod completions;
pub mod config;
pub mod configure;
pub mod dispatcher;
pub mod install;
pub mod list;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
