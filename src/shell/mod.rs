//! Shell command execution and host platform queries.

pub mod command;
pub mod platform;

pub use command::{execute, execute_quiet, CommandOptions, CommandResult};
pub use platform::{is_ci, is_elevated, is_writable, OsClass};
