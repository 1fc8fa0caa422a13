//! pkgprobe - Locate, install, or stub out optional external packages.
//!
//! A project that can build against optional third-party packages runs
//! pkgprobe to decide, package by package, whether a working installation
//! exists. Packages are searched for in a fixed set of candidate locations,
//! can be installed from an extracted source tree first, and publish
//! substitution and define tokens for the build configuration.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, validation, and resolution
//! - [`context`] - State shared by packages during a configure run
//! - [`error`] - Error types and result aliases
//! - [`framework`] - Dependency ordering and the configure driver
//! - [`install`] - Copying package trees into the install root
//! - [`packages`] - The package plugins
//! - [`probe`] - Candidate locations and module checks
//! - [`shell`] - Shell command execution and platform queries
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use pkgprobe::config::{ProbeConfig, ProbeOptions};
//! use pkgprobe::context::ConfigureContext;
//! use pkgprobe::framework::Framework;
//! use pkgprobe::ui::MockUI;
//! use std::path::Path;
//!
//! let config = ProbeConfig {
//!     search_roots: vec![],
//!     ..Default::default()
//! };
//! let options = ProbeOptions::resolve_with_python(&config, Path::new("/proj"), "3.11");
//! let mut ctx = ConfigureContext::new(options);
//! let mut framework = Framework::new(&ctx.options);
//!
//! let report = framework
//!     .configure(&["triangle".to_string()], &mut ctx, &mut MockUI::new())
//!     .unwrap();
//! assert_eq!(report.substitutions["TRIANGLE_LIB"], "");
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod framework;
pub mod install;
pub mod packages;
pub mod probe;
pub mod shell;
pub mod ui;

pub use error::{ProbeError, Result};
