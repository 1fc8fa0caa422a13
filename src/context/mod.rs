//! State shared by every package during a configure run.
//!
//! The context is passed by `&mut` into each lifecycle call. Packages may
//! append to the found-package list, the action log, the configure log and
//! the search path, and may set substitutions and defines. Nothing is ever
//! removed.
//!
//! # Modules
//!
//! - [`actions`] - Human-readable record of install actions
//! - [`log`] - Configure transcript

pub mod actions;
pub mod log;

pub use actions::{Action, ActionLog};
pub use log::ConfigureLog;

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::ProbeOptions;
use crate::probe::{FsModuleLoader, ModuleLoader};

/// A package that passed verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundPackage {
    /// Package name.
    pub name: String,
    /// Location tag of the guess that succeeded.
    pub location: String,
    /// Directory the package was loaded from.
    pub lib_dir: PathBuf,
}

/// Shared configure state.
pub struct ConfigureContext {
    /// Resolved run options.
    pub options: ProbeOptions,
    /// Action log.
    pub actions: ActionLog,
    /// Configure transcript.
    pub log: ConfigureLog,
    loader: Box<dyn ModuleLoader>,
    packages: Vec<FoundPackage>,
    substitutions: BTreeMap<String, String>,
    defines: BTreeMap<String, String>,
    search_path: Vec<PathBuf>,
}

impl ConfigureContext {
    /// Create a context that loads modules from disk.
    pub fn new(options: ProbeOptions) -> Self {
        Self::with_loader(options, Box::new(FsModuleLoader))
    }

    /// Create a context with a custom module loader.
    pub fn with_loader(options: ProbeOptions, loader: Box<dyn ModuleLoader>) -> Self {
        Self {
            options,
            actions: ActionLog::new(),
            log: ConfigureLog::new(),
            loader,
            packages: Vec::new(),
            substitutions: BTreeMap::new(),
            defines: BTreeMap::new(),
            search_path: Vec::new(),
        }
    }

    /// The module loader.
    pub fn loader(&self) -> &dyn ModuleLoader {
        self.loader.as_ref()
    }

    /// Register a verified package.
    ///
    /// Returns `false` if a package of the same name is already registered;
    /// the first registration stands.
    pub fn register_found(&mut self, found: FoundPackage) -> bool {
        if self.is_found(&found.name) {
            return false;
        }
        tracing::info!(package = %found.name, lib_dir = %found.lib_dir.display(), "package found");
        self.packages.push(found);
        true
    }

    /// Verified packages in registration order.
    pub fn packages(&self) -> &[FoundPackage] {
        &self.packages
    }

    /// Look up a verified package by name (case-insensitive).
    pub fn found_package(&self, name: &str) -> Option<&FoundPackage> {
        self.packages
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Whether a package of this name has been verified.
    pub fn is_found(&self, name: &str) -> bool {
        self.found_package(name).is_some()
    }

    /// Set a substitution token.
    pub fn add_substitution(&mut self, name: &str, value: &str) {
        self.substitutions
            .insert(name.to_string(), value.to_string());
    }

    /// Set a define token.
    pub fn add_define(&mut self, name: &str, value: &str) {
        self.defines.insert(name.to_string(), value.to_string());
    }

    /// Substitution tokens, sorted by name.
    pub fn substitutions(&self) -> &BTreeMap<String, String> {
        &self.substitutions
    }

    /// Define tokens, sorted by name.
    pub fn defines(&self) -> &BTreeMap<String, String> {
        &self.defines
    }

    /// Put `dir` at the front of the module search path.
    pub fn prepend_search_path(&mut self, dir: &Path) {
        self.search_path.insert(0, dir.to_path_buf());
    }

    /// Directories probed so far, most recent first.
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProbeConfig;

    fn context() -> ConfigureContext {
        let options =
            ProbeOptions::resolve_with_python(&ProbeConfig::default(), Path::new("/proj"), "3.11");
        ConfigureContext::new(options)
    }

    fn found(name: &str, location: &str) -> FoundPackage {
        FoundPackage {
            name: name.to_string(),
            location: location.to_string(),
            lib_dir: PathBuf::from("/lib"),
        }
    }

    #[test]
    fn first_registration_wins() {
        let mut ctx = context();
        assert!(ctx.register_found(found("FIAT", "first")));
        assert!(!ctx.register_found(found("FIAT", "second")));

        assert_eq!(ctx.packages().len(), 1);
        assert_eq!(ctx.packages()[0].location, "first");
        assert!(ctx.is_found("fiat"));
    }

    #[test]
    fn search_path_is_prepended() {
        let mut ctx = context();
        ctx.prepend_search_path(Path::new("/a"));
        ctx.prepend_search_path(Path::new("/b"));
        assert_eq!(
            ctx.search_path(),
            &[PathBuf::from("/b"), PathBuf::from("/a")]
        );
    }

    #[test]
    fn substitutions_overwrite_by_name() {
        let mut ctx = context();
        ctx.add_substitution("TRIANGLE_LIB", "x");
        ctx.add_substitution("TRIANGLE_LIB", "");
        assert_eq!(ctx.substitutions().len(), 1);
        assert_eq!(ctx.substitutions()["TRIANGLE_LIB"], "");
    }
}
