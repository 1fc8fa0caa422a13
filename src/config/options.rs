//! Resolved run options.
//!
//! [`ProbeOptions`] is what packages actually see: paths made absolute
//! against the project root, the interpreter version settled, and the
//! elevated-install prefix decided.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::schema::{PackageOptions, ProbeConfig};
use crate::probe::{detect_python_version, FALLBACK_PYTHON_VERSION};
use crate::shell::{is_elevated, is_writable, OsClass};

/// Install root used when none is configured, relative to the project.
pub const DEFAULT_INSTALL_SUBDIR: &str = "externalpackages/install";

/// Options for a configure run.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeOptions {
    /// Project the run belongs to.
    pub project_root: PathBuf,
    /// Root packages are installed under.
    pub install_dir: PathBuf,
    /// Command prefix for elevated installs; `None` installs directly.
    pub install_sudo: Option<String>,
    /// Timeout for the elevated install command, in seconds.
    pub shell_timeout: u64,
    /// Interpreter `major.minor`.
    pub python_version: String,
    /// System roots searched for packages.
    pub search_roots: Vec<PathBuf>,
    /// Where substitutions are written after configure.
    pub output: Option<PathBuf>,
    /// Per-package options keyed by lower-case name.
    pub packages: BTreeMap<String, PackageOptions>,
    /// Host OS class.
    #[serde(skip)]
    pub os: OsClass,
}

impl ProbeOptions {
    /// Resolve `config` against `project_root`.
    ///
    /// Detects the interpreter version when the config doesn't pin one.
    pub fn resolve(config: &ProbeConfig, project_root: &Path) -> Self {
        let python_version = config
            .python_version
            .clone()
            .or_else(detect_python_version)
            .unwrap_or_else(|| FALLBACK_PYTHON_VERSION.to_string());
        Self::resolve_with_python(config, project_root, &python_version)
    }

    /// Resolve `config` with an explicit interpreter version.
    pub fn resolve_with_python(
        config: &ProbeConfig,
        project_root: &Path,
        python_version: &str,
    ) -> Self {
        let absolute = |p: &Path| -> PathBuf {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                project_root.join(p)
            }
        };

        let install_dir = config
            .install_dir
            .as_deref()
            .map(absolute)
            .unwrap_or_else(|| project_root.join(DEFAULT_INSTALL_SUBDIR));

        let install_sudo = match &config.install_sudo {
            Some(prefix) if !prefix.trim().is_empty() => Some(normalize_prefix(prefix)),
            Some(_) => None,
            None if config.auto_sudo && !is_elevated() && !is_writable(&install_dir) => {
                tracing::info!(
                    install_dir = %install_dir.display(),
                    "install root is not writable, using sudo"
                );
                Some("sudo ".to_string())
            }
            None => None,
        };

        let packages = config
            .packages
            .iter()
            .map(|(name, opts)| {
                let resolved = PackageOptions {
                    dir: opts.dir.as_deref().map(absolute),
                    download: opts.download,
                    package_dir: opts.package_dir.as_deref().map(absolute),
                };
                (name.to_lowercase(), resolved)
            })
            .collect();

        Self {
            project_root: project_root.to_path_buf(),
            install_dir,
            install_sudo,
            shell_timeout: config.shell_timeout,
            python_version: python_version.to_string(),
            search_roots: config.search_roots.iter().map(|p| absolute(p)).collect(),
            output: config.output.as_deref().map(absolute),
            packages,
            os: OsClass::current(),
        }
    }

    /// Options for a package, by lower-case name.
    pub fn package(&self, lower: &str) -> Option<&PackageOptions> {
        self.packages.get(lower)
    }
}

/// Ensure a sudo prefix ends with whitespace so it can be glued to a command.
fn normalize_prefix(prefix: &str) -> String {
    if prefix.ends_with(char::is_whitespace) {
        prefix.to_string()
    } else {
        format!("{} ", prefix)
    }
}
