//! Error types for pkgprobe operations.
//!
//! This module defines [`ProbeError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Fatal conditions (dependency setup, install, total verification failure)
//!   are `ProbeError` variants and abort configuration of the package
//! - Per-guess load failures are [`LoadError`](crate::probe::LoadError)s; they
//!   are logged and the next guess is tried
//! - Use `anyhow::Error` (via `ProbeError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pkgprobe operations.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Requested package is not registered.
    #[error("Unknown package: {name}")]
    UnknownPackage { name: String },

    /// A package required by another could not be resolved.
    #[error("Package '{package}' requires '{dependency}': {message}")]
    DependencyUnresolved {
        package: String,
        dependency: String,
        message: String,
    },

    /// Package dependency cycle detected.
    #[error("Circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    /// Elevated install command failed.
    #[error(
        "Error copying {package} files from {} to {}: {message}",
        .source_dir.display(),
        .destination.display()
    )]
    InstallFailed {
        package: String,
        source_dir: PathBuf,
        destination: PathBuf,
        message: String,
    },

    /// Install requested for a package that cannot be installed here.
    #[error("Cannot install '{package}': {reason}")]
    InstallUnsupported { package: String, reason: String },

    /// No guess produced a working installation.
    #[error("Could not find a functional {package}")]
    NotFunctional { package: String },

    /// Shell command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Shell command exceeded its timeout and was killed.
    #[error("Command timed out after {seconds}s: {command}")]
    CommandTimedOut { command: String, seconds: u64 },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProbeError {
    /// Process exit code for this error: 2 for configuration problems, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            ProbeError::ConfigNotFound { .. }
            | ProbeError::ConfigParseError { .. }
            | ProbeError::ConfigValidationError { .. } => 2,
            _ => 1,
        }
    }
}

/// Result type alias for pkgprobe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
