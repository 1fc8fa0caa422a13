//! External package plugins.
//!
//! Every optional dependency implements [`Package`]. The host calls
//! `setup_dependencies` once, then, in dependency order, optionally
//! `install` followed by `configure`.
//!
//! Two kinds exist:
//!
//! - [`LocatePackage`] searches candidate locations for a working install
//!   and can install one from extracted sources
//! - [`StubPackage`] never looks for anything and always reports the
//!   package as absent
//!
//! # Modules
//!
//! - [`descriptor`] - Static package description
//! - [`locate`] - The locate-or-install plugin
//! - [`stub`] - The always-absent plugin
//! - [`fiat`], [`scientific_python`], [`triangle`] - Concrete packages

pub mod descriptor;
pub mod fiat;
pub mod locate;
pub mod scientific_python;
pub mod stub;
pub mod triangle;

pub use descriptor::{python_altlibdir, PackageDescriptor, PYTHON_LIBDIR};
pub use locate::LocatePackage;
pub use stub::StubPackage;

use std::path::{Path, PathBuf};

use crate::context::ConfigureContext;
use crate::error::{ProbeError, Result};
use crate::probe::{Guess, FALLBACK_PYTHON_VERSION};
use crate::shell::OsClass;
use crate::ui::UserInterface;

/// Resolves package names on behalf of a requesting package.
pub trait Requirer {
    /// Require `name` for `requester`, returning its canonical lower-case name.
    ///
    /// Fails with [`ProbeError::DependencyUnresolved`] if `name` is unknown.
    fn require(&mut self, name: &str, requester: &str) -> Result<String>;
}

/// An optional external package.
pub trait Package {
    /// Static description.
    fn descriptor(&self) -> &PackageDescriptor;

    /// Register packages that must be configured before this one.
    fn setup_dependencies(&mut self, _requirer: &mut dyn Requirer) -> Result<()> {
        Ok(())
    }

    /// Whether [`install`](Package::install) is available on `os`.
    fn supports_install(&self, os: OsClass) -> bool {
        self.descriptor().supports_install_on(os)
    }

    /// Install from the extracted source tree, returning the install root.
    fn install(
        &mut self,
        _ctx: &mut ConfigureContext,
        _ui: &mut dyn UserInterface,
        _source_dir: &Path,
    ) -> Result<PathBuf> {
        Err(ProbeError::InstallUnsupported {
            package: self.descriptor().name.clone(),
            reason: "no download source".to_string(),
        })
    }

    /// Find a working installation among `guesses`.
    fn configure_library(&mut self, ctx: &mut ConfigureContext, guesses: &[Guess]) -> Result<()>;

    /// Publish substitution and define tokens.
    fn set_output(&self, ctx: &mut ConfigureContext);

    /// Check the library, then publish outputs.
    fn configure(&mut self, ctx: &mut ConfigureContext, guesses: &[Guess]) -> Result<()> {
        self.configure_library(ctx, guesses)?;
        self.set_output(ctx);
        Ok(())
    }

    /// Whether verification has succeeded.
    fn found(&self) -> bool;
}

/// Every package this crate knows about, configured for `python_version`.
pub fn builtin_packages(python_version: &str) -> Vec<Box<dyn Package>> {
    vec![
        Box::new(fiat::fiat(python_version)),
        Box::new(scientific_python::scientific_python(python_version)),
        Box::new(triangle::triangle()),
    ]
}

/// Lower-case names of the built-in packages.
pub fn builtin_names() -> Vec<String> {
    builtin_packages(FALLBACK_PYTHON_VERSION)
        .iter()
        .map(|p| p.descriptor().lower.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_unique() {
        let packages = builtin_packages("3.11");
        let mut names: Vec<_> = packages
            .iter()
            .map(|p| p.descriptor().lower.clone())
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names, vec!["fiat", "scientificpython", "triangle"]);
        assert_eq!(builtin_names().len(), 3);
    }
}
