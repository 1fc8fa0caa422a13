//! The locate-or-install plugin.
//!
//! A [`LocatePackage`] walks its guesses in order and stops at the first
//! directory the module loader accepts. Packages that ship a source subtree
//! can also be installed into the install root before the search.

use std::path::{Path, PathBuf};

use super::{Package, PackageDescriptor, Requirer};
use crate::context::{ConfigureContext, FoundPackage};
use crate::error::{ProbeError, Result};
use crate::install::{install_tree, InstallMode, InstallPlan};
use crate::probe::Guess;
use crate::ui::UserInterface;

/// Module and symbols that prove an installation works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Module loaded from each candidate directory.
    pub module: String,
    /// Symbols the module must expose.
    pub symbols: Vec<String>,
}

impl Verification {
    pub fn new(module: &str, symbols: &[&str]) -> Self {
        Self {
            module: module.to_string(),
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Try each guess in order and return the first one that verifies.
///
/// Every attempted directory is logged and prepended to the search path.
/// Load failures are logged and skipped. The winner is registered in the
/// context before it is returned.
pub fn probe_guesses(
    name: &str,
    verification: &Verification,
    ctx: &mut ConfigureContext,
    guesses: &[Guess],
) -> Result<FoundPackage> {
    let symbols: Vec<&str> = verification.symbols.iter().map(String::as_str).collect();

    for guess in guesses {
        let lib_dir = guess.lib_dir();
        ctx.log.write(&format!("Checking location {}", guess.location));
        ctx.log.write(&format!(
            "Added directory {} to module search path",
            lib_dir.display()
        ));
        ctx.prepend_search_path(&lib_dir);

        let verified = ctx
            .loader()
            .load(&lib_dir, &verification.module)
            .and_then(|handle| handle.require(&symbols));

        match verified {
            Ok(()) => {
                let found = FoundPackage {
                    name: name.to_string(),
                    location: guess.location.clone(),
                    lib_dir,
                };
                ctx.register_found(found.clone());
                return Ok(found);
            }
            Err(e) => {
                tracing::debug!(
                    package = %name,
                    location = %guess.location,
                    error = %e,
                    "guess rejected"
                );
                ctx.log
                    .log_print(&format!("ERROR: Could not import {}: {}", name, e));
            }
        }
    }

    Err(ProbeError::NotFunctional {
        package: name.to_string(),
    })
}

/// A package found by probing candidate directories.
#[derive(Debug, Clone)]
pub struct LocatePackage {
    descriptor: PackageDescriptor,
    verification: Verification,
    requires: Vec<String>,
    install_subdir: Option<String>,
    found: Option<FoundPackage>,
}

impl LocatePackage {
    /// Create a plugin that verifies `descriptor` with `verification`.
    pub fn new(descriptor: PackageDescriptor, verification: Verification) -> Self {
        Self {
            descriptor,
            verification,
            requires: Vec::new(),
            install_subdir: None,
            found: None,
        }
    }

    /// Require another package before this one is configured.
    pub fn requires(mut self, name: &str) -> Self {
        self.requires.push(name.to_string());
        self
    }

    /// Install the named subtree of the extracted sources.
    pub fn installs(mut self, subdir: &str) -> Self {
        self.install_subdir = Some(subdir.to_string());
        self
    }

    /// Where the package was found, once it has been.
    pub fn found_at(&self) -> Option<&FoundPackage> {
        self.found.as_ref()
    }
}

impl Package for LocatePackage {
    fn descriptor(&self) -> &PackageDescriptor {
        &self.descriptor
    }

    fn setup_dependencies(&mut self, requirer: &mut dyn Requirer) -> Result<()> {
        for name in &self.requires {
            let lower = requirer.require(name, &self.descriptor.name)?;
            self.descriptor.add_dep(&lower);
        }
        Ok(())
    }

    fn install(
        &mut self,
        ctx: &mut ConfigureContext,
        ui: &mut dyn UserInterface,
        source_dir: &Path,
    ) -> Result<PathBuf> {
        let name = self.descriptor.name.clone();
        let subdir = match &self.install_subdir {
            Some(subdir) => subdir.clone(),
            None => {
                return Err(ProbeError::InstallUnsupported {
                    package: name,
                    reason: "no source subtree to install".to_string(),
                })
            }
        };
        if !self.supports_install(ctx.options.os) {
            return Err(ProbeError::InstallUnsupported {
                package: name,
                reason: format!("not supported on {}", ctx.options.os),
            });
        }

        ctx.log.log_print_box(&format!("Installing {}", name));

        let install_dir = ctx.options.install_dir.clone();
        let plan = InstallPlan::new(
            &name,
            source_dir,
            &install_dir,
            &self.descriptor.altlibdir,
            &subdir,
        );
        let sudo = ctx.options.install_sudo.clone();
        let mode = match sudo.as_deref() {
            Some(sudo) => InstallMode::Elevated {
                sudo,
                timeout: ctx.options.shell_timeout,
            },
            None => InstallMode::Direct,
        };

        tracing::info!(
            package = %name,
            destination = %plan.destination.display(),
            elevated = sudo.is_some(),
            "installing"
        );
        install_tree(&plan, mode, ui)?;

        ctx.actions.record(
            &name,
            "Install",
            &format!("Installed {} into {}", name, install_dir.display()),
        );
        Ok(install_dir)
    }

    fn configure_library(&mut self, ctx: &mut ConfigureContext, guesses: &[Guess]) -> Result<()> {
        let name = self.descriptor.name.clone();
        ctx.log.rule();
        ctx.log.write(&format!("Checking for a functional {}", name));

        for dep in &self.descriptor.deps {
            if !ctx.is_found(dep) {
                return Err(ProbeError::DependencyUnresolved {
                    package: name,
                    dependency: dep.clone(),
                    message: "dependency was not found".to_string(),
                });
            }
        }

        let found = probe_guesses(&name, &self.verification, ctx, guesses)?;
        self.found = Some(found);
        Ok(())
    }

    fn set_output(&self, ctx: &mut ConfigureContext) {
        if let Some(found) = &self.found {
            let upper = &self.descriptor.upper;
            ctx.add_define(&format!("HAVE_{}", upper), "1");
            ctx.add_substitution(
                &format!("{}_DIR", upper),
                &found.lib_dir.display().to_string(),
            );
        }
    }

    fn found(&self) -> bool {
        self.found.is_some()
    }
}
