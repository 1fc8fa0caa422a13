//! Static description of an external package.

use serde::Serialize;
use std::path::PathBuf;

use crate::shell::OsClass;

/// Primary layout for Python-style packages.
pub const PYTHON_LIBDIR: &str = "lib/python/site-packages";

/// What a package is called, where it comes from, and how it is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDescriptor {
    /// Display name (e.g. `FIAT`).
    pub name: String,
    /// Canonical upper-case identifier, used for output tokens.
    pub upper: String,
    /// Canonical lower-case identifier, used for lookup and options.
    pub lower: String,
    /// Source archive URIs.
    pub download: Vec<String>,
    /// Whether installation is allowed on Windows hosts.
    pub download_on_windows: bool,
    /// Candidate library-file sets, tried in order.
    pub liblist: Vec<Vec<String>>,
    /// Primary library layout under an install root.
    pub libdir: PathBuf,
    /// Alternate library layout, keyed to the interpreter version.
    pub altlibdir: PathBuf,
    /// Include layout under an install root.
    pub includedir: PathBuf,
    /// Lower-case names of packages that must be configured first.
    pub deps: Vec<String>,
}

impl PackageDescriptor {
    /// Create a descriptor with default layouts and no sources.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            upper: name.to_uppercase(),
            lower: name.to_lowercase(),
            download: Vec::new(),
            download_on_windows: false,
            liblist: Vec::new(),
            libdir: PathBuf::from("lib"),
            altlibdir: PathBuf::from("lib"),
            includedir: PathBuf::from("include"),
            deps: Vec::new(),
        }
    }

    /// Set the download URIs.
    pub fn with_download(mut self, uris: &[&str]) -> Self {
        self.download = uris.iter().map(|u| u.to_string()).collect();
        self
    }

    /// Allow installation on Windows.
    pub fn with_download_on_windows(mut self, allowed: bool) -> Self {
        self.download_on_windows = allowed;
        self
    }

    /// Set the candidate library-file sets.
    pub fn with_liblist(mut self, liblist: Vec<Vec<String>>) -> Self {
        self.liblist = liblist;
        self
    }

    /// Use the `site-packages` layouts for interpreter `major.minor`.
    pub fn with_python_layout(mut self, python_version: &str) -> Self {
        self.libdir = PathBuf::from(PYTHON_LIBDIR);
        self.altlibdir = python_altlibdir(python_version);
        self
    }

    /// Record a dependency, ignoring duplicates.
    pub fn add_dep(&mut self, lower: &str) {
        if !self.deps.iter().any(|d| d == lower) {
            self.deps.push(lower.to_string());
        }
    }

    /// Whether this package can be installed on `os`.
    pub fn supports_install_on(&self, os: OsClass) -> bool {
        !self.download.is_empty() && (os != OsClass::Windows || self.download_on_windows)
    }
}

/// `lib/python<major.minor>/site-packages`.
pub fn python_altlibdir(python_version: &str) -> PathBuf {
    PathBuf::from("lib")
        .join(format!("python{}", python_version))
        .join("site-packages")
}
