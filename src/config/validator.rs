//! Configuration validation rules.
//!
//! - `install_dir` must not be empty
//! - `shell_timeout` must be positive
//! - per-package options must name a registered package
//! - `download` requires a `package_dir`

use crate::config::schema::ProbeConfig;
use crate::error::{ProbeError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Package name if error is package-specific
    pub package: Option<String>,
}

/// Validate a configuration and return all errors.
///
/// `known_packages` holds the lower-case names of registered packages.
pub fn validate_config(config: &ProbeConfig, known_packages: &[&str]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config
        .install_dir
        .as_ref()
        .is_some_and(|d| d.as_os_str().is_empty())
    {
        errors.push(ValidationError {
            rule: "empty-install-dir".to_string(),
            message: "'install_dir' must not be empty".to_string(),
            package: None,
        });
    }

    if config.shell_timeout == 0 {
        errors.push(ValidationError {
            rule: "zero-timeout".to_string(),
            message: "'shell_timeout' must be greater than zero".to_string(),
            package: None,
        });
    }

    for (name, opts) in &config.packages {
        if !known_packages.contains(&name.to_lowercase().as_str()) {
            errors.push(ValidationError {
                rule: "unknown-package".to_string(),
                message: format!("Options given for unknown package '{}'", name),
                package: Some(name.clone()),
            });
        }
        if opts.download && opts.package_dir.is_none() {
            errors.push(ValidationError {
                rule: "download-without-source".to_string(),
                message: format!(
                    "Package '{}' sets 'download' but has no 'package_dir'",
                    name
                ),
                package: Some(name.clone()),
            });
        }
    }

    errors
}

/// Validate a configuration, returning the first-class error on failure.
pub fn validate(config: &ProbeConfig, known_packages: &[&str]) -> Result<()> {
    let errors = validate_config(config, known_packages);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(ProbeError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::PackageOptions;
    use std::path::PathBuf;

    const KNOWN: &[&str] = &["fiat", "scientificpython", "triangle"];

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&ProbeConfig::default(), KNOWN).is_ok());
    }

    #[test]
    fn rejects_empty_install_dir() {
        let config = ProbeConfig {
            install_dir: Some(PathBuf::new()),
            ..Default::default()
        };
        let errors = validate_config(&config, KNOWN);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "empty-install-dir");
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ProbeConfig {
            shell_timeout: 0,
            ..Default::default()
        };
        let errors = validate_config(&config, KNOWN);
        assert!(errors.iter().any(|e| e.rule == "zero-timeout"));
    }

    #[test]
    fn rejects_unknown_package() {
        let mut config = ProbeConfig::default();
        config
            .packages
            .insert("petsc4py".to_string(), PackageOptions::default());

        let errors = validate_config(&config, KNOWN);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].package.as_deref(), Some("petsc4py"));
    }

    #[test]
    fn package_names_are_case_insensitive() {
        let mut config = ProbeConfig::default();
        config
            .packages
            .insert("FIAT".to_string(), PackageOptions::default());
        assert!(validate(&config, KNOWN).is_ok());
    }

    #[test]
    fn download_requires_package_dir() {
        let mut config = ProbeConfig::default();
        config.packages.insert(
            "fiat".to_string(),
            PackageOptions {
                download: true,
                ..Default::default()
            },
        );

        let err = validate(&config, KNOWN).unwrap_err();

        assert!(err.to_string().contains("package_dir"));
    }
}
