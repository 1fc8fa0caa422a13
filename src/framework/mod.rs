//! Driving packages through a configure run.
//!
//! The [`Framework`] owns every known package. A run resolves the selected
//! packages and everything they require, orders them so dependencies come
//! first, then installs (when asked to) and configures each one against a
//! shared [`ConfigureContext`]. The first fatal error stops the run.

pub mod dependency;
pub mod report;

pub use dependency::{DependencyGraph, DependencyGraphBuilder};
pub use report::ConfigureReport;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::config::ProbeOptions;
use crate::context::ConfigureContext;
use crate::error::{ProbeError, Result};
use crate::packages::{builtin_packages, Package, Requirer};
use crate::probe::{generate_guesses, GuessSources};
use crate::ui::UserInterface;

/// Collects `require` calls made while packages set up their dependencies.
#[derive(Debug, Default)]
struct Requirements {
    known: BTreeSet<String>,
    requested: Vec<String>,
}

impl Requirer for Requirements {
    fn require(&mut self, name: &str, requester: &str) -> Result<String> {
        let lower = name.to_lowercase();
        if !self.known.contains(&lower) {
            return Err(ProbeError::DependencyUnresolved {
                package: requester.to_string(),
                dependency: name.to_string(),
                message: "unknown package".to_string(),
            });
        }
        tracing::debug!(requester, dependency = %lower, "dependency required");
        self.requested.push(lower.clone());
        Ok(lower)
    }
}

/// Registry of packages plus the logic to run them.
pub struct Framework {
    packages: BTreeMap<String, Box<dyn Package>>,
    set_up: BTreeSet<String>,
}

impl Framework {
    /// Framework holding every built-in package.
    pub fn new(options: &ProbeOptions) -> Self {
        Self::with_packages(builtin_packages(&options.python_version))
    }

    /// Framework holding the given packages.
    pub fn with_packages(packages: Vec<Box<dyn Package>>) -> Self {
        let packages = packages
            .into_iter()
            .map(|p| (p.descriptor().lower.clone(), p))
            .collect();
        Self {
            packages,
            set_up: BTreeSet::new(),
        }
    }

    /// Lower-case names of all known packages, sorted.
    pub fn names(&self) -> Vec<String> {
        self.packages.keys().cloned().collect()
    }

    /// Look up a package by name (case-insensitive).
    pub fn package(&self, name: &str) -> Option<&dyn Package> {
        self.packages.get(&name.to_lowercase()).map(|p| p.as_ref())
    }

    /// All packages, sorted by lower-case name.
    pub fn packages(&self) -> impl Iterator<Item = &dyn Package> {
        self.packages.values().map(|p| p.as_ref())
    }

    fn canonical(&self, name: &str) -> Result<String> {
        let lower = name.to_lowercase();
        if self.packages.contains_key(&lower) {
            Ok(lower)
        } else {
            Err(ProbeError::UnknownPackage {
                name: name.to_string(),
            })
        }
    }

    /// Run `setup_dependencies` for `selection` and everything it requires.
    ///
    /// Each package is set up at most once per framework. Returns the
    /// lower-case names of the full closure.
    pub fn setup(&mut self, selection: &[String]) -> Result<BTreeSet<String>> {
        let known: BTreeSet<String> = self.packages.keys().cloned().collect();
        let mut closure = BTreeSet::new();
        let mut pending = selection
            .iter()
            .map(|name| self.canonical(name))
            .collect::<Result<Vec<_>>>()?;

        while let Some(name) = pending.pop() {
            if !closure.insert(name.clone()) {
                continue;
            }

            let package = self
                .packages
                .get_mut(&name)
                .ok_or_else(|| ProbeError::UnknownPackage { name: name.clone() })?;

            if self.set_up.insert(name.clone()) {
                let mut requirements = Requirements {
                    known: known.clone(),
                    requested: Vec::new(),
                };
                package.setup_dependencies(&mut requirements)?;
                pending.extend(requirements.requested);
            } else {
                pending.extend(package.descriptor().deps.iter().cloned());
            }
        }

        Ok(closure)
    }

    /// Configure order for `selection`, dependencies first.
    ///
    /// An empty selection means every known package, so one missing
    /// package fails the whole run.
    pub fn order(&mut self, selection: &[String]) -> Result<Vec<String>> {
        let selection = if selection.is_empty() {
            self.names()
        } else {
            selection.to_vec()
        };
        let closure = self.setup(&selection)?;

        let mut builder = DependencyGraph::builder();
        for name in &closure {
            if let Some(package) = self.packages.get(name) {
                builder = builder.add_package(name.clone(), &package.descriptor().deps);
            }
        }
        builder.build()?.topological_order()
    }

    /// Install (when requested) and configure `selection`.
    pub fn configure(
        &mut self,
        selection: &[String],
        ctx: &mut ConfigureContext,
        ui: &mut dyn UserInterface,
    ) -> Result<ConfigureReport> {
        let order = self.order(selection)?;
        tracing::info!(order = ?order, "configuring packages");

        for name in &order {
            let package = self
                .packages
                .get_mut(name)
                .ok_or_else(|| ProbeError::UnknownPackage { name: name.clone() })?;
            configure_one(package.as_mut(), ctx, ui)?;
        }

        Ok(ConfigureReport::from_context(order, ctx))
    }

    /// Install one package from `source_dir`, returning its install root.
    pub fn install(
        &mut self,
        name: &str,
        source_dir: &Path,
        ctx: &mut ConfigureContext,
        ui: &mut dyn UserInterface,
    ) -> Result<PathBuf> {
        let lower = self.canonical(name)?;
        let package = self
            .packages
            .get_mut(&lower)
            .ok_or_else(|| ProbeError::UnknownPackage {
                name: name.to_string(),
            })?;
        package.install(ctx, ui, source_dir)
    }
}

fn configure_one(
    package: &mut dyn Package,
    ctx: &mut ConfigureContext,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let name = package.descriptor().name.clone();
    let lower = package.descriptor().lower.clone();
    let options = ctx.options.package(&lower).cloned().unwrap_or_default();

    let installed_root = if options.download {
        let source = options
            .package_dir
            .clone()
            .ok_or_else(|| ProbeError::ConfigValidationError {
                message: format!(
                    "packages.{}.download is set but packages.{}.package_dir is not",
                    lower, lower
                ),
            })?;
        ui.message(&format!("Installing {} from {}", name, source.display()));
        Some(package.install(ctx, ui, &source)?)
    } else {
        None
    };

    let search_roots = ctx.options.search_roots.clone();
    let guesses = generate_guesses(
        package.descriptor(),
        &GuessSources {
            user_dir: options.dir.as_deref(),
            installed_root: installed_root.as_deref(),
            search_roots: &search_roots,
        },
    );

    let mut spinner = ui.start_spinner(&format!("Checking for {}", name));
    match package.configure(ctx, &guesses) {
        Ok(()) => {
            match ctx.found_package(&name) {
                Some(found) if package.found() => {
                    spinner.finish_success(&format!("{} found at {}", name, found.lib_dir.display()))
                }
                _ => spinner.finish_success(&format!("{} configured", name)),
            }
            Ok(())
        }
        Err(e) => {
            spinner.finish_error(&format!("{} failed", name));
            Err(e)
        }
    }
}
