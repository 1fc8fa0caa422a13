//! List command implementation.
//!
//! The `pkgprobe list` command lists the packages pkgprobe knows about.

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::cli::settings::Settings;
use crate::error::{ProbeError, Result};
use crate::framework::Framework;
use crate::packages::PackageDescriptor;
use crate::ui::theme::ProbeTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// One row of the listing.
#[derive(Debug, Serialize)]
struct PackageEntry<'a> {
    #[serde(flatten)]
    descriptor: &'a PackageDescriptor,
    installable: bool,
}

/// The list command implementation.
pub struct ListCommand {
    settings: Settings,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(settings: &Settings, args: ListArgs) -> Self {
        Self {
            settings: settings.clone(),
            args,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let options = self.settings.resolve()?;
        let mut framework = Framework::new(&options);
        // Fills in each descriptor's dependencies.
        framework.order(&[])?;

        let entries: Vec<_> = framework
            .packages()
            .map(|p| PackageEntry {
                descriptor: p.descriptor(),
                installable: p.supports_install(options.os),
            })
            .collect();

        if self.args.json {
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| ProbeError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let theme = ProbeTheme::new();
        ui.show_header("Packages");
        for entry in &entries {
            let d = entry.descriptor;
            let mut detail = Vec::new();
            if entry.installable {
                detail.push("installable".to_string());
            }
            if !d.deps.is_empty() {
                detail.push(format!("requires {}", d.deps.join(", ")));
            }
            let detail = if detail.is_empty() {
                String::new()
            } else {
                format!(" {}", theme.dim.apply_to(format!("({})", detail.join("; "))))
            };
            ui.message(&format!("  {}{}", d.name, detail));
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn settings(temp: &TempDir) -> Settings {
        let dir = temp.path().join(".pkgprobe");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), "python_version: \"3.11\"\n").unwrap();
        Settings::new(temp.path())
    }

    #[test]
    fn lists_every_package() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        ListCommand::new(&settings(&temp), ListArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_message("FIAT"));
        assert!(ui.has_message("requires scientificpython"));
        assert!(ui.has_message("ScientificPython"));
        assert!(ui.has_message("Triangle"));
    }

    #[test]
    fn json_includes_layouts() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        ListCommand::new(&settings(&temp), ListArgs { json: true })
            .execute(&mut ui)
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        let fiat = json
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["name"] == "FIAT")
            .unwrap();
        assert_eq!(fiat["altlibdir"], "lib/python3.11/site-packages");
        assert_eq!(fiat["deps"][0], "scientificpython");
    }
}
