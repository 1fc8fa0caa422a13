//! Locating installed packages.
//!
//! # Modules
//!
//! - [`guesses`] - Candidate install locations in priority order
//! - [`loader`] - Module loading and symbol checks for a candidate directory
//! - [`python`] - Interpreter version detection for the alternate layout

pub mod guesses;
pub mod loader;
pub mod python;

pub use guesses::{generate_guesses, Guess, GuessSources};
pub use loader::{FsModuleLoader, LoadError, ModuleHandle, ModuleLoader};
pub use python::{detect_python_version, parse_python_version, FALLBACK_PYTHON_VERSION};
