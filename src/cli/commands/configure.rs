//! Configure command implementation.
//!
//! The `pkgprobe configure` command runs the full package lifecycle and
//! reports what was found, what was installed, and the substitutions that
//! resulted.

use std::path::PathBuf;

use crate::cli::args::ConfigureArgs;
use crate::cli::settings::Settings;
use crate::context::ConfigureContext;
use crate::error::{ProbeError, Result};
use crate::framework::{ConfigureReport, Framework};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The configure command implementation.
pub struct ConfigureCommand {
    settings: Settings,
    args: ConfigureArgs,
}

impl ConfigureCommand {
    /// Create a new configure command.
    pub fn new(settings: &Settings, args: ConfigureArgs) -> Self {
        Self {
            settings: settings.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigureArgs {
        &self.args
    }

    fn show_report(&self, report: &ConfigureReport, ui: &mut dyn UserInterface) {
        for found in &report.found {
            ui.success(&format!(
                "{}: {} ({})",
                found.name,
                found.lib_dir.display(),
                found.location
            ));
        }
        for action in &report.actions {
            ui.message(&format!("  {}", action.message));
        }
        if !report.substitutions.is_empty() {
            ui.message("");
            ui.message(report.substitution_lines().trim_end());
        }
    }
}

impl Command for ConfigureCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let options = self.settings.resolve()?;
        let output: Option<PathBuf> = self.args.output.clone().or_else(|| options.output.clone());

        let mut ctx = ConfigureContext::new(options);
        let mut framework = Framework::new(&ctx.options);

        if !self.args.json {
            ui.show_header("Configuring external packages");
        }
        let result = framework.configure(&self.args.packages, &mut ctx, ui);

        if ui.output_mode().shows_transcript() && !self.args.json {
            for line in ctx.log.lines() {
                ui.message(line);
            }
        }
        if let Some(path) = &self.args.log {
            ctx.log.save(path)?;
        }

        let report = result?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| ProbeError::Other(e.into()))?;
            ui.message(&json);
        } else {
            self.show_report(&report, ui);
        }

        if let Some(path) = &output {
            report.write_substitutions(path)?;
            if !self.args.json {
                ui.message(&format!("Wrote substitutions to {}", path.display()));
            }
        }

        Ok(CommandResult::success())
    }
}
