//! Configuration loading, merging, validation, and resolution.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//! - Resolution into run options in [`options`]
//!
//! # Example
//!
//! ```
//! use pkgprobe::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".pkgprobe");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "shell_timeout: 600").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config, &["fiat"]).unwrap();
//! assert_eq!(config.shell_timeout, 600);
//! ```

pub mod loader;
pub mod merger;
pub mod options;
pub mod schema;
pub mod validator;

pub use loader::{
    load_config_file, load_config_value, load_merged_config, load_or_default, parse_config,
    ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs};
pub use options::{ProbeOptions, DEFAULT_INSTALL_SUBDIR};
pub use schema::{PackageOptions, ProbeConfig, DEFAULT_SHELL_TIMEOUT};
pub use validator::{validate, validate_config, ValidationError};
