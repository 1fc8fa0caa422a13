//! Configuration schema.
//!
//! The on-disk configuration lives in `.pkgprobe/config.yml` and may be
//! overridden by `.pkgprobe/config.local.yml`. Every field is optional.
//!
//! ```yaml
//! install_dir: externalpackages/install
//! install_sudo: "sudo "
//! shell_timeout: 6000
//! python_version: "3.11"
//! search_roots: [/usr/local, /usr]
//! output: build/substitutions.conf
//! packages:
//!   fiat:
//!     download: true
//!     package_dir: externalpackages/fiat-0.9.9
//!   scientificpython:
//!     dir: /opt/scientific
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default bound on the elevated install command, in seconds.
pub const DEFAULT_SHELL_TIMEOUT: u64 = 6000;

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Root that packages are installed under.
    #[serde(default)]
    pub install_dir: Option<PathBuf>,

    /// Command prefix for elevated installs (e.g. `"sudo "`).
    #[serde(default)]
    pub install_sudo: Option<String>,

    /// Pick `sudo ` automatically when the install root isn't writable.
    #[serde(default)]
    pub auto_sudo: bool,

    /// Timeout for the elevated install command, in seconds.
    #[serde(default = "default_shell_timeout")]
    pub shell_timeout: u64,

    /// Interpreter `major.minor` used for the alternate library layout.
    #[serde(default)]
    pub python_version: Option<String>,

    /// System roots searched after user and install locations.
    #[serde(default = "default_search_roots")]
    pub search_roots: Vec<PathBuf>,

    /// Where to write substitutions after configure.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Per-package options keyed by lower-case package name.
    #[serde(default)]
    pub packages: BTreeMap<String, PackageOptions>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            install_dir: None,
            install_sudo: None,
            auto_sudo: false,
            shell_timeout: default_shell_timeout(),
            python_version: None,
            search_roots: default_search_roots(),
            output: None,
            packages: BTreeMap::new(),
        }
    }
}

/// Options for a single package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageOptions {
    /// Install root the user points at explicitly.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Install the package from `package_dir` before checking it.
    #[serde(default)]
    pub download: bool,

    /// Extracted source tree of the package.
    #[serde(default)]
    pub package_dir: Option<PathBuf>,
}

fn default_shell_timeout() -> u64 {
    DEFAULT_SHELL_TIMEOUT
}

fn default_search_roots() -> Vec<PathBuf> {
    vec![PathBuf::from("/usr/local"), PathBuf::from("/usr")]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: ProbeConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ProbeConfig::default());
        assert_eq!(config.shell_timeout, 6000);
        assert_eq!(config.search_roots.len(), 2);
    }

    #[test]
    fn parses_package_options() {
        let yaml = r#"
install_dir: /opt/install
install_sudo: "sudo "
packages:
  fiat:
    download: true
    package_dir: /tmp/fiat-0.9.9
"#;
        let config: ProbeConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.install_dir, Some(PathBuf::from("/opt/install")));
        assert_eq!(config.install_sudo.as_deref(), Some("sudo "));
        let fiat = &config.packages["fiat"];
        assert!(fiat.download);
        assert_eq!(fiat.package_dir, Some(PathBuf::from("/tmp/fiat-0.9.9")));
        assert!(fiat.dir.is_none());
    }

    #[test]
    fn search_roots_can_be_replaced() {
        let config: ProbeConfig = serde_yaml::from_str("search_roots: [/sw]").unwrap();
        assert_eq!(config.search_roots, vec![PathBuf::from("/sw")]);
    }
}
