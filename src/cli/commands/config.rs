//! Config command implementation.
//!
//! The `pkgprobe config` command shows resolved configuration.

use crate::cli::args::ConfigArgs;
use crate::cli::settings::Settings;
use crate::config::{ConfigPaths, ProbeOptions, CONFIG_DIR};
use crate::error::{ProbeError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    settings: Settings,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(settings: &Settings, args: ConfigArgs) -> Self {
        Self {
            settings: settings.clone(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ConfigArgs {
        &self.args
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.settings.load_config()?;
        let options = ProbeOptions::resolve(&config, &self.settings.project_root);

        if let Some(path) = &self.settings.config_path {
            ui.message(&format!("# {}", path.display()));
        } else {
            let paths = ConfigPaths::discover(&self.settings.project_root);
            if !paths.has_project_config() {
                ui.warning(&format!(
                    "No configuration found in {}; showing defaults",
                    self.settings.project_root.join(CONFIG_DIR).display()
                ));
            }
            for path in paths.all_existing() {
                ui.message(&format!("# {}", path.display()));
            }
        }
        ui.message("");

        if self.args.json {
            let json = serde_json::to_string_pretty(&options)
                .map_err(|e| ProbeError::Other(e.into()))?;
            ui.message(&json);
        } else {
            let yaml =
                serde_yaml::to_string(&options).map_err(|e| ProbeError::Other(e.into()))?;
            ui.message(&yaml);
        }

        Ok(CommandResult::success())
    }
}
