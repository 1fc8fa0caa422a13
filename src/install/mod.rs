//! Installing a package subtree into the install root.
//!
//! Both install paths end in the same state: the destination holds exactly
//! one fresh copy of the source subtree and nothing from a previous install.
//! The elevated path does this with a single composite shell command run
//! under a timeout; the direct path uses filesystem calls.

pub mod copy;

pub use copy::copy_dir_recursive;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ProbeError, Result};
use crate::shell::{execute, CommandOptions};
use crate::ui::UserInterface;

/// Source and destination of one install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    /// Package being installed.
    pub package: String,
    /// Subtree copied from the extracted sources.
    pub source: PathBuf,
    /// Directory the subtree is installed under.
    pub install_loc: PathBuf,
    /// Final location of the subtree.
    pub destination: PathBuf,
}

impl InstallPlan {
    /// Plan copying `<source_root>/<subdir>` to `<install_dir>/<layout>/<subdir>`.
    pub fn new(
        package: &str,
        source_root: &Path,
        install_dir: &Path,
        layout: &Path,
        subdir: &str,
    ) -> Self {
        let install_loc = install_dir.join(layout);
        Self {
            package: package.to_string(),
            source: source_root.join(subdir),
            destination: install_loc.join(subdir),
            install_loc,
        }
    }

    /// The composite command run for an elevated install.
    pub fn elevated_command(&self, sudo: &str) -> String {
        format!(
            "{sudo}mkdir -p {loc} && {sudo}rm -rf {dest} && {sudo}cp -rf {src} {dest}",
            sudo = sudo,
            loc = shell_quote(&self.install_loc),
            dest = shell_quote(&self.destination),
            src = shell_quote(&self.source),
        )
    }
}

/// How the subtree gets copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode<'a> {
    /// Run one shell command with the given prefix, bounded by `timeout` seconds.
    Elevated { sudo: &'a str, timeout: u64 },
    /// Use filesystem calls as the current user.
    Direct,
}

/// Carry out `plan`.
///
/// Elevated failures of any kind become [`ProbeError::InstallFailed`] naming
/// source and destination. Direct-path filesystem errors propagate as-is.
pub fn install_tree(
    plan: &InstallPlan,
    mode: InstallMode<'_>,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    match mode {
        InstallMode::Elevated { sudo, timeout } => install_elevated(plan, sudo, timeout, ui),
        InstallMode::Direct => install_direct(plan),
    }
}

fn install_elevated(
    plan: &InstallPlan,
    sudo: &str,
    timeout: u64,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    ui.warning(&format!(
        "Installing {} into {} requires elevated privileges; you may be asked for your password",
        plan.package,
        plan.install_loc.display()
    ));

    let command = plan.elevated_command(sudo);
    let options = CommandOptions {
        timeout: Some(timeout),
        ..Default::default()
    };

    let mut spinner = ui.start_spinner(&format!("Copying {} files", plan.package));
    let failure = |message: String| ProbeError::InstallFailed {
        package: plan.package.clone(),
        source_dir: plan.source.clone(),
        destination: plan.destination.clone(),
        message,
    };

    let result = match execute(&command, &options) {
        Ok(result) => result,
        Err(e) => {
            spinner.finish_error(&format!("Copying {} files failed", plan.package));
            return Err(failure(e.to_string()));
        }
    };

    if !result.success {
        spinner.finish_error(&format!("Copying {} files failed", plan.package));
        let detail = result.stderr.trim();
        let message = match result.exit_code {
            Some(code) if detail.is_empty() => format!("exit code {}", code),
            Some(code) => format!("exit code {}: {}", code, detail),
            None => "terminated by signal".to_string(),
        };
        return Err(failure(message));
    }

    spinner.finish_success(&format!("Copied {} files", plan.package));
    Ok(())
}

fn install_direct(plan: &InstallPlan) -> Result<()> {
    if !plan.install_loc.is_dir() {
        fs::create_dir_all(&plan.install_loc)?;
    }
    if plan.destination.exists() {
        tracing::debug!(dest = %plan.destination.display(), "removing previous install");
        fs::remove_dir_all(&plan.destination)?;
    }
    copy_dir_recursive(&plan.source, &plan.destination)
}

/// Single-quote a path for `/bin/sh`.
fn shell_quote(path: &Path) -> String {
    let raw = path.to_string_lossy();
    format!("'{}'", raw.replace('\'', r"'\''"))
}
