//! Run settings shared by every command.
//!
//! Global flags are folded into the loaded configuration here, so commands
//! only ever see one merged, validated view.

use std::path::{Path, PathBuf};

use crate::cli::args::Cli;
use crate::config::{load_or_default, validate, PackageOptions, ProbeConfig, ProbeOptions};
use crate::error::{ProbeError, Result};
use crate::packages::builtin_names;

/// Config overrides taken from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub install_dir: Option<PathBuf>,
    pub sudo: Option<String>,
    pub with_dir: Vec<(String, PathBuf)>,
    pub download: Vec<String>,
    pub package_dir: Vec<(String, PathBuf)>,
}

impl Overrides {
    /// Collect overrides from parsed flags.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            install_dir: cli.install_dir.clone(),
            sudo: cli.sudo.clone(),
            with_dir: parse_pairs("--with-dir", &cli.with_dir)?,
            download: cli.download.clone(),
            package_dir: parse_pairs("--package-dir", &cli.package_dir)?,
        })
    }

    /// Apply on top of `config`.
    pub fn apply(&self, config: &mut ProbeConfig) {
        if let Some(dir) = &self.install_dir {
            config.install_dir = Some(dir.clone());
        }
        if let Some(sudo) = &self.sudo {
            config.install_sudo = Some(sudo.clone());
        }
        for (name, dir) in &self.with_dir {
            package_entry(config, name).dir = Some(dir.clone());
        }
        for name in &self.download {
            package_entry(config, name).download = true;
        }
        for (name, dir) in &self.package_dir {
            package_entry(config, name).package_dir = Some(dir.clone());
        }
    }
}

/// Options entry for `name`, matched case-insensitively, created if absent.
fn package_entry<'a>(config: &'a mut ProbeConfig, name: &str) -> &'a mut PackageOptions {
    let key = config
        .packages
        .keys()
        .find(|k| k.eq_ignore_ascii_case(name))
        .cloned()
        .unwrap_or_else(|| name.to_lowercase());
    config.packages.entry(key).or_default()
}

fn parse_pairs(flag: &str, values: &[String]) -> Result<Vec<(String, PathBuf)>> {
    values
        .iter()
        .map(|value| match value.split_once('=') {
            Some((name, path)) if !name.is_empty() && !path.is_empty() => {
                Ok((name.to_string(), PathBuf::from(path)))
            }
            _ => Err(ProbeError::ConfigValidationError {
                message: format!("{} expects NAME=PATH, got '{}'", flag, value),
            }),
        })
        .collect()
}

/// Where a command runs and how it is configured.
#[derive(Debug, Clone)]
pub struct Settings {
    pub project_root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub overrides: Overrides,
}

impl Settings {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: None,
            overrides: Overrides::default(),
        }
    }

    /// Settings for the parsed command line.
    pub fn from_cli(project_root: &Path, cli: &Cli) -> Result<Self> {
        Ok(Self {
            project_root: project_root.to_path_buf(),
            config_path: cli.config.clone(),
            overrides: Overrides::from_cli(cli)?,
        })
    }

    /// Load, override, and validate the configuration.
    pub fn load_config(&self) -> Result<ProbeConfig> {
        let mut config = load_or_default(&self.project_root, self.config_path.as_deref())?;
        self.overrides.apply(&mut config);

        let names = builtin_names();
        let known: Vec<&str> = names.iter().map(String::as_str).collect();
        validate(&config, &known)?;
        Ok(config)
    }

    /// Resolved options for a run.
    pub fn resolve(&self) -> Result<ProbeOptions> {
        let config = self.load_config()?;
        Ok(ProbeOptions::resolve(&config, &self.project_root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn pairs_require_equals() {
        let err = parse_pairs("--with-dir", &["fiat".to_string()]).unwrap_err();
        assert!(err.to_string().contains("NAME=PATH"));

        let pairs = parse_pairs("--with-dir", &["fiat=/opt/fiat".to_string()]).unwrap();
        assert_eq!(pairs, vec![("fiat".to_string(), PathBuf::from("/opt/fiat"))]);
    }

    #[test]
    fn overrides_merge_into_existing_entry() {
        let mut config = ProbeConfig::default();
        config.packages.insert(
            "FIAT".into(),
            PackageOptions {
                dir: Some(PathBuf::from("/opt/fiat")),
                ..Default::default()
            },
        );
        let cli = Cli::parse_from([
            "pkgprobe",
            "--download",
            "fiat",
            "--package-dir",
            "fiat=/src/fiat-0.9.9",
        ]);

        Overrides::from_cli(&cli).unwrap().apply(&mut config);

        assert_eq!(config.packages.len(), 1);
        let fiat = &config.packages["FIAT"];
        assert!(fiat.download);
        assert_eq!(fiat.dir, Some(PathBuf::from("/opt/fiat")));
        assert_eq!(fiat.package_dir, Some(PathBuf::from("/src/fiat-0.9.9")));
    }

    #[test]
    fn unknown_package_override_fails_validation() {
        let temp = TempDir::new().unwrap();
        let cli = Cli::parse_from(["pkgprobe", "--with-dir", "petsc=/opt/petsc"]);
        let settings = Settings::from_cli(temp.path(), &cli).unwrap();

        let err = settings.load_config().unwrap_err();

        assert!(matches!(err, ProbeError::ConfigValidationError { .. }));
    }

    #[test]
    fn flags_override_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".pkgprobe");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), "install_dir: /opt/a\n").unwrap();
        let cli = Cli::parse_from(["pkgprobe", "--install-dir", "/opt/b"]);

        let config = Settings::from_cli(temp.path(), &cli)
            .unwrap()
            .load_config()
            .unwrap();

        assert_eq!(config.install_dir, Some(PathBuf::from("/opt/b")));
    }
}
